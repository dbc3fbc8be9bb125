#![cfg_attr(not(feature = "std"), no_std)]

//! `meshpack-buffer` 提供几何压缩流水线最底层的原始字节缓冲。
//!
//! # 模块定位（Why）
//! - 编码器、解码器、属性与连接关系压缩等上层组件只需要一份统一的“读/写/拷贝/更新”契约，
//!   而不关心底层内存是自行分配的还是调用方借出的。
//! - 缓冲的标识与版本（[`BufferDescriptor`]）对外暴露，供外部缓存以 `(buffer_id, update_count)`
//!   判定内容是否变化。
//!
//! # 设计概要（How）
//! - [`DataBuffer`] 定义共享契约，并把扩容/容量策略委派给变体专属的增长钩子 [`DataBuffer::resize`]；
//! - [`OwnedBuffer`] 自持 `Vec<u8>`，按需重新分配；
//! - [`FixedBuffer`] 借用调用方的定长内存区域，生命周期参数 `'a` 将“外部内存必须比缓冲活得更久”
//!   这一前置条件交给编译器检查；
//! - [`AnyBuffer`] 把两种变体收拢为封闭枚举，便于在构造时选择并穷举匹配。
//!
//! # 契约要点（What）
//! - 默认路径是**不做边界检查**的 `unsafe` 读写（[`DataBuffer::read`]/[`DataBuffer::write`]/
//!   [`DataBuffer::copy`]），调用方负责保证区间合法；`try_*` 系列提供带检查的替代路径。
//! - 增长失败以 [`BufferError`] 返回，失败时缓冲的长度与内容保持不变。
//! - 任何内容修改都不会自动递增 `update_count`，版本号只由调用方显式设置。

extern crate alloc;

mod any;
mod buffer;
mod descriptor;
pub mod error;
mod fixed;
mod owned;
mod sealed;

pub use any::AnyBuffer;
pub use buffer::DataBuffer;
pub use descriptor::BufferDescriptor;
pub use error::BufferError;
pub use fixed::FixedBuffer;
pub use owned::OwnedBuffer;

/// 便捷别名，统一 crate 内的返回类型。
pub type Result<T, E = BufferError> = core::result::Result<T, E>;
