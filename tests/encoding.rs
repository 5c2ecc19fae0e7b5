//! Integration tests against the public API: the worked scenarios and the round-trip
//! properties the wire format promises.

use proptest::prelude::*;
use rstest::rstest;

use regdeps_codec::codec::{build, CanonicalMap, MemoryOperand, NativeOperand, NativeReg};
use regdeps_codec::{decode, encode, ArithFlags, Category, Instruction, OperandSize, RegId};

#[rstest]
// BRANCH (0x10) sits at the category field's bit 10, i.e. 0x10 << 10 = 0x4000.
#[case::empty_branch(Category::BRANCH, ArithFlags::empty(), None, vec![], vec![], &[0x00, 0x40, 0x00, 0x00])]
#[case::single_dst_int_math_writes(
    Category::INT_MATH,
    ArithFlags::WRITES,
    Some(OperandSize::Bytes4),
    vec![RegId::new(3)],
    vec![],
    &[0x01, 0x05, 0x00, 0x00, OperandSize::Bytes4 as u8, 3, 0, 0]
)]
#[case::two_src_one_dst_load_reads(
    Category::LOAD,
    ArithFlags::READS,
    Some(OperandSize::Bytes4),
    vec![RegId::new(7)],
    vec![RegId::new(8), RegId::new(9)],
    &[0x21, 0x12, 0x00, 0x00, OperandSize::Bytes4 as u8, 7, 8, 9]
)]
fn worked_scenarios_match_exact_bytes(
    #[case] category: Category,
    #[case] arith: ArithFlags,
    #[case] op_size: Option<OperandSize>,
    #[case] dsts: Vec<RegId>,
    #[case] srcs: Vec<RegId>,
    #[case] expected: &[u8],
) {
    let instr = Instruction::new(category, arith, op_size, dsts, srcs).unwrap();
    let mut out = vec![0u8; instr.encoded_len()];
    let n = encode(&instr, &mut out).unwrap();
    assert_eq!(n, expected.len());
    assert_eq!(&out[..n], expected);

    let (decoded, consumed) = decode(&out).unwrap();
    assert_eq!(consumed, n);
    assert_eq!(decoded, instr);
}

#[test]
fn maximal_eight_operand_simd_instruction_round_trips() {
    let dsts: Vec<RegId> = (0..4).map(RegId::new).collect();
    let srcs: Vec<RegId> = (4..8).map(RegId::new).collect();
    let instr = Instruction::new(
        Category::SIMD,
        ArithFlags::from_predicates(true, true),
        Some(OperandSize::Bytes32),
        dsts,
        srcs,
    )
    .unwrap();
    assert_eq!(instr.encoded_len(), 16);

    let mut out = vec![0u8; 16];
    let n = encode(&instr, &mut out).unwrap();
    assert_eq!(n, 16);

    let (decoded, consumed) = decode(&out).unwrap();
    assert_eq!(consumed, 16);
    assert_eq!(decoded, instr);
}

#[test]
fn memory_destination_folds_address_registers_into_sources_end_to_end() {
    // A store through [base + index] folds both address registers into the source
    // set, leaving the destination set empty, matching an x86 `mov [rax+rbx], ecx`
    // style instruction's dependency shape.
    let map = CanonicalMap::identity();
    let dst = [NativeOperand::Memory(MemoryOperand {
        base: Some(NativeReg::new(RegId::new(0), OperandSize::Bytes8)),
        index: Some(NativeReg::new(RegId::new(1), OperandSize::Bytes8)),
    })];
    let src = [NativeOperand::Register(NativeReg::new(RegId::new(2), OperandSize::Bytes4))];

    let instr = build(Category::STORE, ArithFlags::empty(), &map, &dst, &src, None).unwrap();
    assert!(instr.dsts().is_empty());
    assert_eq!(instr.srcs(), &[RegId::new(0), RegId::new(1), RegId::new(2)]);

    let mut out = vec![0u8; instr.encoded_len()];
    encode(&instr, &mut out).unwrap();
    let (decoded, _) = decode(&out).unwrap();
    assert_eq!(decoded, instr);
}

#[test]
fn duplicate_sub_register_references_dedup_to_one_canonical_operand() {
    // AX and EAX both alias the same full register; a native decoder surfacing both
    // as distinct source reads must fold to a single canonical operand, with the
    // instruction-level size reflecting the widest reference observed.
    let mut table = core::array::from_fn(|i| RegId::new(i as u8));
    table[20] = RegId::new(1); // AX -> RCX-style canonical register 1
    let map = CanonicalMap::from_table(table);

    let src = [
        NativeOperand::Register(NativeReg::new(RegId::new(20), OperandSize::Bytes2)),
        NativeOperand::Register(NativeReg::new(RegId::new(1), OperandSize::Bytes4)),
    ];
    let instr = build(Category::INT_MATH, ArithFlags::empty(), &map, &[], &src, None).unwrap();
    assert_eq!(instr.srcs(), &[RegId::new(1)]);
    assert_eq!(instr.operand_size(), Some(OperandSize::Bytes4));
}

#[test]
fn encoder_rejects_nine_operands() {
    let dsts: Vec<RegId> = (0..9).map(RegId::new).collect();
    assert!(Instruction::new(Category::UNCATEGORIZED, ArithFlags::empty(), Some(OperandSize::Bytes1), dsts, vec![])
        .is_err());
}

#[test]
fn decode_rejects_truncated_input() {
    assert!(decode(&[0x01, 0x05, 0x00]).is_err());
    assert!(decode(&[0x01, 0x05, 0x00, 0x00, OperandSize::Bytes4 as u8]).is_err());
}

fn category_strategy() -> impl Strategy<Value = Category> {
    (0u32..(1 << 22)).prop_map(Category::from_bits)
}

fn arith_strategy() -> impl Strategy<Value = ArithFlags> {
    (any::<bool>(), any::<bool>()).prop_map(|(w, r)| ArithFlags::from_predicates(w, r))
}

fn size_strategy() -> impl Strategy<Value = OperandSize> {
    use OperandSize::*;
    prop_oneof![
        Just(Bytes1),
        Just(Bytes4),
        Just(Bytes8),
        Just(Bytes16),
        Just(Bits4),
        Just(VarByMode),
    ]
}

fn instruction_strategy() -> impl Strategy<Value = Instruction> {
    (
        category_strategy(),
        arith_strategy(),
        size_strategy(),
        prop::collection::vec(any::<u8>(), 0..=8),
        0usize..=8,
    )
        .prop_map(|(category, arith, size, all_regs, split)| {
            let split = split.min(all_regs.len());
            let dsts: Vec<RegId> = all_regs[..split].iter().copied().map(RegId::new).collect();
            let srcs: Vec<RegId> = all_regs[split..].iter().copied().map(RegId::new).collect();
            let op_size = if dsts.is_empty() && srcs.is_empty() { None } else { Some(size) };
            Instruction::new(category, arith, op_size, dsts, srcs)
                .expect("strategy never generates more than 8 total operands")
        })
}

proptest! {
    #[test]
    fn round_trip_law(instr in instruction_strategy()) {
        let mut out = vec![0u8; instr.encoded_len()];
        let n = encode(&instr, &mut out).unwrap();
        let (decoded, consumed) = decode(&out[..n]).unwrap();
        prop_assert_eq!(consumed, n);
        prop_assert_eq!(decoded.category(), instr.category());
        prop_assert_eq!(decoded.arith_flags(), instr.arith_flags());
        prop_assert_eq!(decoded.dsts(), instr.dsts());
        prop_assert_eq!(decoded.srcs(), instr.srcs());
        prop_assert_eq!(decoded.operand_size(), instr.operand_size());
    }

    #[test]
    fn reencoding_a_decoded_instruction_is_idempotent(instr in instruction_strategy()) {
        let mut first = vec![0u8; instr.encoded_len()];
        encode(&instr, &mut first).unwrap();
        let (decoded, len) = decode(&first).unwrap();

        let mut second = vec![0u8; len];
        encode(&decoded, &mut second).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn encoded_length_is_four_byte_aligned(instr in instruction_strategy()) {
        prop_assert_eq!(instr.encoded_len() % 4, 0);
    }

    #[test]
    fn encoded_length_matches_header_derived_length(instr in instruction_strategy()) {
        let mut out = vec![0u8; instr.encoded_len()];
        let n = encode(&instr, &mut out).unwrap();
        let (_, consumed) = decode(&out).unwrap();
        prop_assert_eq!(n, consumed);
    }

    #[test]
    fn category_bits_survive_the_round_trip_including_unnamed_bits(bits in 0u32..(1 << 22)) {
        let category = Category::from_bits(bits);
        let instr = Instruction::new(category, ArithFlags::empty(), None, vec![], vec![]).unwrap();
        let mut out = vec![0u8; instr.encoded_len()];
        encode(&instr, &mut out).unwrap();
        let (decoded, _) = decode(&out).unwrap();
        prop_assert_eq!(decoded.category().bits(), bits);
    }
}
