//! 封闭 [`DataBuffer`](crate::DataBuffer) 的实现集合。
//!
//! # 设计意图（Why）
//! - 缓冲变体只有“自持可增长”与“借用定长”两种，上层需要能够穷举匹配；
//!   若允许外部 crate 自由实现契约，`AnyBuffer` 的穷举语义将失效。
//!
//! # 维护提示（Maintenance）
//! - 新增变体时需在此处登记，并同步扩展 [`AnyBuffer`](crate::AnyBuffer)。

pub trait Sealed {}

impl Sealed for crate::OwnedBuffer {}
impl Sealed for crate::FixedBuffer<'_> {}
impl Sealed for crate::AnyBuffer<'_> {}
