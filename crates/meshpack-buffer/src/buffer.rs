use core::ptr;

use bytes::BufMut;

use crate::{
    BufferDescriptor, BufferError, Result,
    error::{check_range, range_end},
    sealed::Sealed,
};

/// `DataBuffer` 定义几何压缩流水线共享的原始字节缓冲契约。
///
/// # 设计背景（Why）
/// - 流水线中的编码器、解码器与属性压缩器都只通过“整体更新、局部更新、读、写、跨缓冲拷贝、序列化”
///   这组操作访问缓冲；底层究竟是自持的可增长内存，还是调用方借出的定长区域，不应泄露到调用点。
/// - 热路径上的逐字节访问对性能极其敏感，因此契约默认**不做边界检查**。
///
/// # 逻辑解析（How）
/// - 变体只需实现五个必需方法：内容视图 `data`/`data_mut`、描述符访问、`capacity` 与增长钩子 `resize`；
/// - 其余操作均为默认方法，建立在内容视图与 `resize` 之上，保证两种变体的语义完全一致；
/// - trait 通过私有 supertrait 封闭，变体集合固定为 [`OwnedBuffer`](crate::OwnedBuffer)、
///   [`FixedBuffer`](crate::FixedBuffer) 及其枚举 [`AnyBuffer`](crate::AnyBuffer)。
///
/// # 契约说明（What）
/// - **有效内容**：`data()` 返回的 `data_size()` 字节始终可读；之外的任何访问都是调用方违约；
/// - **增长失败**：`update`/`update_at`/`resize` 失败时返回 [`BufferError`](crate::BufferError)，
///   长度与内容保持调用前的状态；
/// - **描述符**：任何内容修改都不会改动 [`BufferDescriptor`]，`update_count` 只能通过
///   [`set_update_count`](Self::set_update_count) 推进；
/// - **并发**：所有修改操作均要求 `&mut self`，跨线程共享需借助外部同步原语。
///
/// # 设计考量（Trade-offs & Gotchas）
/// - **未检查路径为默认**：`read`/`write`/`copy`/`copy_within` 是 `unsafe fn`，仅在 debug 构建中以
///   `debug_assert!` 兜底；需要安全性的调用方使用 `try_*` 系列，代价是一次区间比较。
/// - **对象安全**：`copy` 的源参数为 `&dyn DataBuffer`，序列化目标为 `&mut dyn BufMut`，
///   以便在不知道具体变体的组件之间传递。
pub trait DataBuffer: Sealed {
    /// 返回有效内容的只读视图，长度即 [`data_size`](Self::data_size)。
    fn data(&self) -> &[u8];

    /// 返回有效内容的可写视图。
    fn data_mut(&mut self) -> &mut [u8];

    /// 返回描述符副本。
    fn descriptor(&self) -> BufferDescriptor;

    /// 返回描述符的可变引用。
    fn descriptor_mut(&mut self) -> &mut BufferDescriptor;

    /// 无需重新分配即可容纳的字节数。
    fn capacity(&self) -> usize;

    /// 增长钩子：将有效长度调整为 `size`。
    ///
    /// # 契约说明（What）
    /// - **成功**：`data_size() == size`；前缀 `[0, min(旧长度, size))` 保持不变，
    ///   新暴露的字节一律填零；
    /// - **失败**：返回 `CapacityExceeded`（定长变体）或 `AllocationFailed`（自持变体），
    ///   长度与内容不变。
    fn resize(&mut self, size: usize) -> Result<()>;

    /// 当前有效字节数。
    fn data_size(&self) -> usize {
        self.data().len()
    }

    /// 判断缓冲是否为空。
    fn is_empty(&self) -> bool {
        self.data_size() == 0
    }

    /// 用 `data` 替换全部有效内容，长度随之变为 `data.len()`。
    ///
    /// # 执行步骤（How）
    /// 1. 通过 [`resize`](Self::resize) 调整长度，失败时直接返回，内容未被触碰；
    /// 2. 将 `data` 整体写入 `[0, data.len())`。
    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.resize(data.len())?;
        self.data_mut().copy_from_slice(data);
        Ok(())
    }

    /// 从 `offset` 起写入 `data`，必要时增长到 `offset + data.len()`。
    ///
    /// # 契约说明（What）
    /// - 若 `offset + data.len()` 不超过当前长度，长度不变；
    /// - 否则长度变为恰好 `offset + data.len()`；`offset` 大于旧长度时，
    ///   空隙 `[旧长度, offset)` 由增长钩子填零；
    /// - `offset + data.len()` 溢出时返回 `SizeOverflow`，缓冲不变。
    fn update_at(&mut self, data: &[u8], offset: usize) -> Result<()> {
        let end = range_end(offset, data.len())?;
        if end > self.data_size() {
            self.resize(end)?;
        }
        self.data_mut()[offset..end].copy_from_slice(data);
        Ok(())
    }

    /// 不检查边界地把 `[byte_pos, byte_pos + out.len())` 拷贝到 `out`。
    ///
    /// # Safety
    /// 调用方必须保证 `byte_pos + out.len() <= self.data_size()`，否则行为未定义。
    unsafe fn read(&self, byte_pos: usize, out: &mut [u8]) {
        let data = self.data();
        debug_assert!(
            check_range(byte_pos, out.len(), data.len()).is_ok(),
            "DataBuffer::read 越界：{byte_pos}+{} > {}",
            out.len(),
            data.len()
        );
        // SAFETY: 调用方保证源区间位于有效内容内；`out` 为独立的可变借用，不会与 `data` 重叠。
        unsafe {
            ptr::copy_nonoverlapping(data.as_ptr().add(byte_pos), out.as_mut_ptr(), out.len());
        }
    }

    /// 不检查边界地把 `in_data` 写入 `[byte_pos, byte_pos + in_data.len())`。
    ///
    /// # Safety
    /// 调用方必须保证 `byte_pos + in_data.len() <= self.data_size()`，否则行为未定义。
    unsafe fn write(&mut self, byte_pos: usize, in_data: &[u8]) {
        let data = self.data_mut();
        debug_assert!(
            check_range(byte_pos, in_data.len(), data.len()).is_ok(),
            "DataBuffer::write 越界：{byte_pos}+{} > {}",
            in_data.len(),
            data.len()
        );
        // SAFETY: 调用方保证目标区间位于有效内容内；`in_data` 是共享借用，不可能指向 `&mut self`。
        unsafe {
            ptr::copy_nonoverlapping(
                in_data.as_ptr(),
                data.as_mut_ptr().add(byte_pos),
                in_data.len(),
            );
        }
    }

    /// 不检查边界地从 `src` 的 `src_offset` 拷贝 `size` 字节到本缓冲的 `dst_offset`。
    ///
    /// `src` 以共享借用传入而 `self` 为独占借用，二者不可能是同一实例；
    /// 同一缓冲内部的搬移请使用 [`copy_within`](Self::copy_within)。
    ///
    /// # Safety
    /// 调用方必须保证 `src_offset + size <= src.data_size()` 且
    /// `dst_offset + size <= self.data_size()`。
    unsafe fn copy(&mut self, dst_offset: usize, src: &dyn DataBuffer, src_offset: usize, size: usize) {
        let src = src.data();
        debug_assert!(check_range(src_offset, size, src.len()).is_ok());
        // SAFETY: 源区间的有效性由调用方保证，切片长度恰为 `size`。
        let src = unsafe { src.get_unchecked(src_offset..src_offset + size) };
        // SAFETY: 目标区间的有效性由调用方保证，沿用 `write` 的契约。
        unsafe { self.write(dst_offset, src) }
    }

    /// 不检查边界地在本缓冲内部搬移 `size` 字节，区间重叠时语义等同 `memmove`。
    ///
    /// # Safety
    /// 调用方必须保证 `src_offset + size` 与 `dst_offset + size` 均不超过 `self.data_size()`。
    unsafe fn copy_within(&mut self, dst_offset: usize, src_offset: usize, size: usize) {
        let data = self.data_mut();
        debug_assert!(check_range(src_offset, size, data.len()).is_ok());
        debug_assert!(check_range(dst_offset, size, data.len()).is_ok());
        let base = data.as_mut_ptr();
        // SAFETY: 两个区间均位于同一有效切片内；`ptr::copy` 允许重叠。
        unsafe {
            ptr::copy(base.add(src_offset), base.add(dst_offset), size);
        }
    }

    /// [`read`](Self::read) 的带检查版本，越界时返回 `OutOfBounds` 且不触碰 `out`。
    fn try_read(&self, byte_pos: usize, out: &mut [u8]) -> Result<()> {
        check_range(byte_pos, out.len(), self.data_size())?;
        // SAFETY: 上一行已校验区间。
        unsafe { self.read(byte_pos, out) };
        Ok(())
    }

    /// [`write`](Self::write) 的带检查版本；不会触发增长。
    fn try_write(&mut self, byte_pos: usize, in_data: &[u8]) -> Result<()> {
        check_range(byte_pos, in_data.len(), self.data_size())?;
        // SAFETY: 上一行已校验区间。
        unsafe { self.write(byte_pos, in_data) };
        Ok(())
    }

    /// [`copy`](Self::copy) 的带检查版本，源与目标区间均需合法。
    fn try_copy(
        &mut self,
        dst_offset: usize,
        src: &dyn DataBuffer,
        src_offset: usize,
        size: usize,
    ) -> Result<()> {
        check_range(src_offset, size, src.data_size())?;
        check_range(dst_offset, size, self.data_size())?;
        // SAFETY: 两个区间均已校验。
        unsafe { self.copy(dst_offset, src, src_offset, size) };
        Ok(())
    }

    /// [`copy_within`](Self::copy_within) 的带检查版本。
    fn try_copy_within(&mut self, dst_offset: usize, src_offset: usize, size: usize) -> Result<()> {
        let len = self.data_size();
        check_range(src_offset, size, len)?;
        check_range(dst_offset, size, len)?;
        // SAFETY: 两个区间均已校验。
        unsafe { self.copy_within(dst_offset, src_offset, size) };
        Ok(())
    }

    /// 将有效内容原样追加到 `sink`，不附带长度前缀或任何帧结构。
    ///
    /// # 契约说明（What）
    /// - 成功时恰好追加 `data_size()` 字节；
    /// - `sink.remaining_mut()` 小于 `data_size()` 时返回 `SinkExhausted`，目标不被写入任何字节；
    ///   `Vec<u8>`、`BytesMut` 等可增长目标的剩余空间近似无限，不会触发该错误。
    fn serialize(&self, sink: &mut dyn BufMut) -> Result<()> {
        let data = self.data();
        let available = sink.remaining_mut();
        if available < data.len() {
            return Err(BufferError::SinkExhausted {
                required: data.len(),
                available,
            });
        }
        sink.put_slice(data);
        Ok(())
    }

    /// 将有效内容原样写入 I/O 目标。
    #[cfg(feature = "std")]
    fn write_to(&self, sink: &mut dyn std::io::Write) -> std::io::Result<()> {
        sink.write_all(self.data())
    }

    /// 缓冲身份。
    fn buffer_id(&self) -> i64 {
        self.descriptor().buffer_id
    }

    /// 设置缓冲身份。
    fn set_buffer_id(&mut self, buffer_id: i64) {
        self.descriptor_mut().buffer_id = buffer_id;
    }

    /// 内容代际计数。
    fn update_count(&self) -> i64 {
        self.descriptor().update_count
    }

    /// 设置内容代际计数；这是 `update_count` 唯一的写入口。
    fn set_update_count(&mut self, update_count: i64) {
        self.descriptor_mut().update_count = update_count;
    }
}
