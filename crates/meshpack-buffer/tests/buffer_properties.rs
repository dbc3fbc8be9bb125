//! `buffer_properties` 属性测试：以随机输入覆盖两种缓冲变体共享的契约不变量。
//!
//! # 测试设计（How）
//! - 借助 `proptest` 生成任意内容、偏移与容量；
//! - 每条属性都同时以“调用前快照”作为对照，断言增长、局部更新与拷贝只影响声明的区间。

use meshpack_buffer::{DataBuffer, FixedBuffer, OwnedBuffer};
use proptest::prelude::*;

/// 生成 `(容量, 不超过容量的内容)`。
fn capacity_and_payload() -> impl Strategy<Value = (usize, Vec<u8>)> {
    (0usize..256).prop_flat_map(|capacity| {
        (
            Just(capacity),
            proptest::collection::vec(any::<u8>(), 0..=capacity),
        )
    })
}

proptest! {
    #[test]
    fn prop_fixed_update_within_capacity_round_trips((capacity, payload) in capacity_and_payload()) {
        let mut region = vec![0u8; capacity];
        let mut buffer = FixedBuffer::new(&mut region);
        prop_assert!(buffer.update(&payload).is_ok());
        let mut out = vec![0u8; payload.len()];
        unsafe { buffer.read(0, &mut out) };
        prop_assert_eq!(out, payload);
    }

    #[test]
    fn prop_fixed_rejects_growth_beyond_capacity(
        initial in proptest::collection::vec(any::<u8>(), 0..64),
        excess in 1usize..32,
        offset_seed in any::<usize>(),
    ) {
        let mut region = initial.clone();
        let capacity = region.len();
        let mut buffer = FixedBuffer::new(&mut region);

        let oversized = vec![0xEEu8; capacity + excess];
        prop_assert!(buffer.update(&oversized).is_err());
        prop_assert_eq!(buffer.data(), &initial[..]);

        let offset = offset_seed % (capacity + 1);
        let tail = vec![0xEEu8; capacity - offset + excess];
        prop_assert!(buffer.update_at(&tail, offset).is_err());
        prop_assert_eq!(buffer.data_size(), capacity);
        prop_assert_eq!(buffer.data(), &initial[..]);
    }

    #[test]
    fn prop_update_at_past_end_preserves_prefix_and_zero_fills(
        initial in proptest::collection::vec(any::<u8>(), 0..64),
        data in proptest::collection::vec(any::<u8>(), 1..32),
        offset in 0usize..96,
    ) {
        let size = initial.len();
        prop_assume!(offset + data.len() > size);

        let mut buffer = OwnedBuffer::from(initial.clone());
        prop_assert!(buffer.update_at(&data, offset).is_ok());
        let content = buffer.data();

        prop_assert_eq!(content.len(), offset + data.len());
        let kept = offset.min(size);
        prop_assert_eq!(&content[..kept], &initial[..kept]);
        prop_assert!(content[kept..offset].iter().all(|&b| b == 0));
        prop_assert_eq!(&content[offset..], &data[..]);
    }

    #[test]
    fn prop_copy_only_touches_destination_range(
        src_bytes in proptest::collection::vec(any::<u8>(), 1..64),
        dst_bytes in proptest::collection::vec(any::<u8>(), 1..64),
        seeds in (any::<usize>(), any::<usize>(), any::<usize>()),
    ) {
        let max = src_bytes.len().min(dst_bytes.len());
        let size = seeds.0 % (max + 1);
        let src_offset = seeds.1 % (src_bytes.len() - size + 1);
        let dst_offset = seeds.2 % (dst_bytes.len() - size + 1);

        let src = OwnedBuffer::from(src_bytes.clone());
        let mut region = dst_bytes.clone();
        let mut dst = FixedBuffer::new(&mut region);
        unsafe { dst.copy(dst_offset, &src, src_offset, size) };

        let mut expected = dst_bytes;
        expected[dst_offset..dst_offset + size]
            .copy_from_slice(&src_bytes[src_offset..src_offset + size]);
        prop_assert_eq!(dst.data(), &expected[..]);
    }

    #[test]
    fn prop_descriptor_survives_any_mutation(
        buffer_id in any::<i64>(),
        first in proptest::collection::vec(any::<u8>(), 0..32),
        second in proptest::collection::vec(any::<u8>(), 0..32),
        offset in 0usize..32,
    ) {
        let mut buffer = OwnedBuffer::new();
        buffer.set_buffer_id(buffer_id);
        prop_assert!(buffer.update(&first).is_ok());
        prop_assert!(buffer.update_at(&second, offset).is_ok());
        let len = buffer.data_size();
        if len > 0 {
            unsafe { buffer.write(len - 1, &[0x5A]) };
        }
        prop_assert_eq!(buffer.buffer_id(), buffer_id);
        prop_assert_eq!(buffer.update_count(), 0);
    }

    #[test]
    fn prop_serialize_emits_exact_content(payload in proptest::collection::vec(any::<u8>(), 0..128)) {
        let mut buffer = OwnedBuffer::new();
        prop_assert!(buffer.update(&payload).is_ok());
        let mut sink: Vec<u8> = Vec::new();
        prop_assert!(buffer.serialize(&mut sink).is_ok());
        prop_assert_eq!(sink, payload);
    }
}
