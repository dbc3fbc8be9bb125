use alloc::vec::Vec;

use bytes::Bytes;

use crate::{BufferDescriptor, BufferError, DataBuffer, Result};

/// `OwnedBuffer` 是自持并可按需增长的字节缓冲。
///
/// # 设计动机（Why）
/// - 编码器在输出长度未知时需要一个能随内容增长的存储；解码器在整块替换属性数据时也依赖
///   “先调整长度、再整体写入”的语义。
/// - 以 `Vec<u8>` 作为后端，复用标准库的摊还扩容策略，同时通过 `try_reserve` 让内存不足
///   以错误而非进程终止的形式返回。
///
/// # 契约说明（What）
/// - **构造**：[`new`](Self::new) 返回长度为 0 的缓冲；[`with_capacity`](Self::with_capacity)
///   预留容量但长度仍为 0；
/// - **增长钩子**：扩大时保留全部旧内容并将新字节填零，缩小时截断；
/// - **失败语义**：申请内存失败返回 [`BufferError::AllocationFailed`]，缓冲保持调用前的长度与内容，
///   不存在“已搬移/失效”的中间态。
///
/// # 风险与取舍（Trade-offs）
/// - 缩小长度不会归还容量，需要时显式调用 [`shrink_to_fit`](Self::shrink_to_fit)；
/// - `try_reserve` 按摊还策略申请容量（通常翻倍），逐字节追加只触发对数次重新分配，
///   代价是容量可能最多为有效长度的两倍；已知最终长度时以 `with_capacity` 预留可避免浪费；
/// - 整体替换（`update`）不经过填零：先预留、再截断并追加，目标字节只写一次。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnedBuffer {
    bytes: Vec<u8>,
    descriptor: BufferDescriptor,
}

impl OwnedBuffer {
    /// 创建空缓冲。
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建预留 `capacity` 字节的空缓冲。
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            descriptor: BufferDescriptor::default(),
        }
    }

    /// 接管已有字节作为初始内容，描述符为默认值。
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            descriptor: BufferDescriptor::default(),
        }
    }

    /// 替换描述符并返回自身，便于注册表在构造时一次性赋予身份。
    pub fn with_descriptor(mut self, descriptor: BufferDescriptor) -> Self {
        self.descriptor = descriptor;
        self
    }

    /// 清空有效内容但保留容量。
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// 归还超出有效长度的多余容量。
    pub fn shrink_to_fit(&mut self) {
        self.bytes.shrink_to_fit();
    }

    /// 消耗缓冲并返回底层 `Vec<u8>`。
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// 消耗缓冲并冻结为只读 [`Bytes`]，不复制数据。
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.bytes)
    }
}

impl From<Vec<u8>> for OwnedBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_vec(bytes)
    }
}

impl From<&[u8]> for OwnedBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_vec(bytes.to_vec())
    }
}

impl DataBuffer for OwnedBuffer {
    fn data(&self) -> &[u8] {
        &self.bytes
    }

    fn data_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    fn descriptor(&self) -> BufferDescriptor {
        self.descriptor
    }

    fn descriptor_mut(&mut self) -> &mut BufferDescriptor {
        &mut self.descriptor
    }

    fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    fn resize(&mut self, size: usize) -> Result<()> {
        self.reserve_total(size)?;
        self.bytes.resize(size, 0);
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.reserve_total(data.len())?;
        self.bytes.clear();
        self.bytes.extend_from_slice(data);
        Ok(())
    }
}

impl OwnedBuffer {
    /// 确保容量至少为 `size`，失败时 Vec 不被修改。
    fn reserve_total(&mut self, size: usize) -> Result<()> {
        let len = self.bytes.len();
        if size <= len {
            return Ok(());
        }
        let before = self.bytes.capacity();
        self.bytes.try_reserve(size - len).map_err(|source| {
            tracing::debug!(
                requested = size,
                capacity = before,
                buffer_id = self.descriptor.buffer_id,
                "owned buffer allocation failed"
            );
            BufferError::AllocationFailed {
                requested: size,
                source,
            }
        })?;
        if self.bytes.capacity() != before {
            tracing::trace!(
                from = before,
                to = self.bytes.capacity(),
                buffer_id = self.descriptor.buffer_id,
                "owned buffer reallocated"
            );
        }
        Ok(())
    }
}
