//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 为缓冲契约的可恢复失败提供集中定义：增长钩子无法满足目标长度、区间运算溢出，
//!   以及带检查访问路径上的越界请求；
//! - 每个变体都映射到稳定错误码，上层流水线可据此决定中止本次编码或切换缓冲变体。
//!
//! ## 设计要求（What）
//! - 错误类型通过 `thiserror::Error` 派生，保证与 `core::error::Error` 生态兼容，且在 `no_std` 下可用；
//! - 不检查边界的 `unsafe` 路径不会产生任何错误，越界属于调用方违约。

use alloc::collections::TryReserveError;

use thiserror::Error;

/// 稳定错误码，遵循 `<领域>.<语义>` 命名约定。
pub mod codes {
    /// 借用定长缓冲无法增长到请求的长度。
    pub const CAPACITY_EXCEEDED: &str = "buffer.capacity_exceeded";
    /// 自持缓冲申请内存失败。
    pub const ALLOCATION_FAILED: &str = "buffer.allocation_failed";
    /// 偏移与长度之和溢出 `usize`。
    pub const SIZE_OVERFLOW: &str = "buffer.size_overflow";
    /// 带检查的访问超出有效内容。
    pub const OUT_OF_BOUNDS: &str = "buffer.out_of_bounds";
    /// 序列化目标剩余空间不足以容纳有效内容。
    pub const SINK_EXHAUSTED: &str = "buffer.sink_exhausted";
}

/// 缓冲契约的错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：把“增长失败”与“越界请求”区分开，前者是运行期资源问题，
///   后者是调用方参数问题，两者的补救策略不同；
/// - **契约 (What)**：
///   - 返回任一变体时，缓冲的长度与内容均保持调用前的状态；
///   - [`code`](Self::code) 返回的字符串在版本间保持稳定；
/// - **设计权衡 (Trade-offs)**：不携带缓冲本身的引用或内容片段，错误可以安全地跨线程移动与记录。
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    /// 借用定长缓冲被要求增长到超出其固定容量。
    #[error("fixed buffer cannot grow to {requested} bytes (capacity {capacity})")]
    CapacityExceeded { requested: usize, capacity: usize },

    /// 自持缓冲未能获得足够内存。
    #[error("failed to allocate backing store for {requested} bytes")]
    AllocationFailed {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    /// `offset + len` 溢出 `usize`，无法表达目标长度。
    #[error("range end overflows: offset {offset} + length {len}")]
    SizeOverflow { offset: usize, len: usize },

    /// 带检查的读写或拷贝请求超出有效内容。
    #[error("range {offset}..{offset}+{len} is out of bounds for a {size}-byte buffer")]
    OutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },

    /// 序列化目标无法容纳全部有效内容；此时目标未被写入任何字节。
    #[error("sink has room for {available} bytes, {required} required")]
    SinkExhausted { required: usize, available: usize },
}

impl BufferError {
    /// 获取稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            BufferError::CapacityExceeded { .. } => codes::CAPACITY_EXCEEDED,
            BufferError::AllocationFailed { .. } => codes::ALLOCATION_FAILED,
            BufferError::SizeOverflow { .. } => codes::SIZE_OVERFLOW,
            BufferError::OutOfBounds { .. } => codes::OUT_OF_BOUNDS,
            BufferError::SinkExhausted { .. } => codes::SINK_EXHAUSTED,
        }
    }

    /// 判断错误是否来自增长路径（`update`/`update_at`/`resize`）。
    ///
    /// 上层流水线通常据此中止当前编码轮次；`OutOfBounds` 则意味着调用方自身存在缺陷。
    pub fn is_growth_failure(&self) -> bool {
        matches!(
            self,
            BufferError::CapacityExceeded { .. }
                | BufferError::AllocationFailed { .. }
                | BufferError::SizeOverflow { .. }
        )
    }
}

/// 计算 `offset + len`，溢出时返回 [`BufferError::SizeOverflow`]。
pub(crate) fn range_end(offset: usize, len: usize) -> Result<usize, BufferError> {
    offset
        .checked_add(len)
        .ok_or(BufferError::SizeOverflow { offset, len })
}

/// 校验 `[offset, offset + len)` 落在 `size` 字节的有效内容内。
pub(crate) fn check_range(offset: usize, len: usize, size: usize) -> Result<(), BufferError> {
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(()),
        _ => Err(BufferError::OutOfBounds { offset, len, size }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_domain_reason_convention() {
        let errors = [
            BufferError::CapacityExceeded {
                requested: 8,
                capacity: 4,
            },
            BufferError::SizeOverflow {
                offset: usize::MAX,
                len: 1,
            },
            BufferError::OutOfBounds {
                offset: 3,
                len: 2,
                size: 4,
            },
            BufferError::SinkExhausted {
                required: 5,
                available: 3,
            },
        ];
        for err in &errors {
            assert!(err.code().starts_with("buffer."), "错误码应位于 buffer 领域");
        }
        assert!(errors[0].is_growth_failure());
        assert!(errors[1].is_growth_failure());
        assert!(!errors[2].is_growth_failure());
        assert!(!errors[3].is_growth_failure());
    }

    #[test]
    fn check_range_rejects_overflowing_end() {
        assert_eq!(check_range(2, 2, 4), Ok(()));
        assert_eq!(check_range(4, 0, 4), Ok(()));
        assert!(check_range(3, 2, 4).is_err());
        assert!(check_range(usize::MAX, 2, usize::MAX).is_err());
    }
}
