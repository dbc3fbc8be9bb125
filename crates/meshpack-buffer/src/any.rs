use crate::{BufferDescriptor, DataBuffer, FixedBuffer, OwnedBuffer, Result};

/// 封闭的缓冲变体集合。
///
/// 分配器在构造时决定使用哪种存储策略，流水线只面对 `AnyBuffer` 或 `&dyn DataBuffer`；
/// 需要区分策略的位置（例如决定是否允许整块替换更大的内容）可以穷举匹配。
#[derive(Debug)]
pub enum AnyBuffer<'a> {
    /// 自持可增长存储。
    Owned(OwnedBuffer),
    /// 借用定长存储。
    Fixed(FixedBuffer<'a>),
}

impl AnyBuffer<'_> {
    /// 是否能够超出当前容量增长。
    pub fn is_growable(&self) -> bool {
        matches!(self, AnyBuffer::Owned(_))
    }
}

impl From<OwnedBuffer> for AnyBuffer<'_> {
    fn from(buffer: OwnedBuffer) -> Self {
        AnyBuffer::Owned(buffer)
    }
}

impl<'a> From<FixedBuffer<'a>> for AnyBuffer<'a> {
    fn from(buffer: FixedBuffer<'a>) -> Self {
        AnyBuffer::Fixed(buffer)
    }
}

impl DataBuffer for AnyBuffer<'_> {
    fn data(&self) -> &[u8] {
        match self {
            AnyBuffer::Owned(buffer) => buffer.data(),
            AnyBuffer::Fixed(buffer) => buffer.data(),
        }
    }

    fn data_mut(&mut self) -> &mut [u8] {
        match self {
            AnyBuffer::Owned(buffer) => buffer.data_mut(),
            AnyBuffer::Fixed(buffer) => buffer.data_mut(),
        }
    }

    fn descriptor(&self) -> BufferDescriptor {
        match self {
            AnyBuffer::Owned(buffer) => buffer.descriptor(),
            AnyBuffer::Fixed(buffer) => buffer.descriptor(),
        }
    }

    fn descriptor_mut(&mut self) -> &mut BufferDescriptor {
        match self {
            AnyBuffer::Owned(buffer) => buffer.descriptor_mut(),
            AnyBuffer::Fixed(buffer) => buffer.descriptor_mut(),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            AnyBuffer::Owned(buffer) => buffer.capacity(),
            AnyBuffer::Fixed(buffer) => buffer.capacity(),
        }
    }

    fn resize(&mut self, size: usize) -> Result<()> {
        match self {
            AnyBuffer::Owned(buffer) => buffer.resize(size),
            AnyBuffer::Fixed(buffer) => buffer.resize(size),
        }
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        match self {
            AnyBuffer::Owned(buffer) => buffer.update(data),
            AnyBuffer::Fixed(buffer) => buffer.update(data),
        }
    }
}
