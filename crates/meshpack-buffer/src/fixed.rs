use crate::{BufferDescriptor, BufferError, DataBuffer, Result};

/// `FixedBuffer` 借用调用方提供的定长内存区域，永不重新分配。
///
/// # 设计动机（Why）
/// - 解码到调用方预先分配的目标内存（例如内存映射文件或 GPU staging 区）时，
///   缓冲不能自行申请内存，也不能改变区域地址。
/// - 以 `&'a mut [u8]` 而非裸指针持有区域，“外部内存必须比缓冲活得更久”这一前置条件
///   由借用检查器在编译期保证。
///
/// # 契约说明（What）
/// - **构造**：有效长度初始等于区域长度，容量即区域长度且终身不变；
/// - **增长钩子**：目标长度不超过容量时成功，新暴露的字节填零；超过容量时返回
///   [`BufferError::CapacityExceeded`]，长度与内容均不变；
/// - **所有权**：缓冲不拥有区域，[`into_inner`](Self::into_inner) 把完整区域交还调用方。
#[derive(Debug)]
pub struct FixedBuffer<'a> {
    region: &'a mut [u8],
    len: usize,
    descriptor: BufferDescriptor,
}

impl<'a> FixedBuffer<'a> {
    /// 以整个 `region` 作为有效内容创建缓冲。
    pub fn new(region: &'a mut [u8]) -> Self {
        let len = region.len();
        Self {
            region,
            len,
            descriptor: BufferDescriptor::default(),
        }
    }

    /// 替换描述符并返回自身。
    pub fn with_descriptor(mut self, descriptor: BufferDescriptor) -> Self {
        self.descriptor = descriptor;
        self
    }

    /// 消耗缓冲，交还完整的借用区域（包括有效长度之外的部分）。
    pub fn into_inner(self) -> &'a mut [u8] {
        self.region
    }
}

impl<'a> From<&'a mut [u8]> for FixedBuffer<'a> {
    fn from(region: &'a mut [u8]) -> Self {
        Self::new(region)
    }
}

impl DataBuffer for FixedBuffer<'_> {
    fn data(&self) -> &[u8] {
        &self.region[..self.len]
    }

    fn data_mut(&mut self) -> &mut [u8] {
        &mut self.region[..self.len]
    }

    fn descriptor(&self) -> BufferDescriptor {
        self.descriptor
    }

    fn descriptor_mut(&mut self) -> &mut BufferDescriptor {
        &mut self.descriptor
    }

    fn capacity(&self) -> usize {
        self.region.len()
    }

    fn resize(&mut self, size: usize) -> Result<()> {
        let capacity = self.region.len();
        if size > capacity {
            tracing::debug!(
                requested = size,
                capacity,
                buffer_id = self.descriptor.buffer_id,
                "fixed buffer growth rejected"
            );
            return Err(BufferError::CapacityExceeded {
                requested: size,
                capacity,
            });
        }
        if size > self.len {
            self.region[self.len..size].fill(0);
        }
        self.len = size;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[test]
    #[traced_test]
    fn rejected_growth_is_logged() {
        let mut region = [0u8; 4];
        let mut buffer = FixedBuffer::new(&mut region);
        buffer.set_buffer_id(3);
        assert!(buffer.resize(5).is_err());
        assert!(logs_contain("fixed buffer growth rejected"));
        assert!(logs_contain("requested=5"));
    }

    #[test]
    fn regrowth_zero_fills_stale_region_bytes() {
        let mut region = *b"stale!";
        let mut buffer = FixedBuffer::new(&mut region);
        buffer.resize(2).expect("缩小总是成功");
        buffer.resize(6).expect("容量内增长应成功");
        assert_eq!(buffer.data(), b"st\0\0\0\0");
    }

    #[test]
    fn into_inner_returns_whole_region() {
        let mut region = [7u8; 8];
        let mut buffer = FixedBuffer::new(&mut region);
        buffer.update(b"ab").expect("容量内更新");
        assert_eq!(buffer.data_size(), 2);
        let region = buffer.into_inner();
        assert_eq!(region.len(), 8);
        assert_eq!(&region[..2], b"ab");
    }
}
