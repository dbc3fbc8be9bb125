/// `BufferDescriptor` 是缓冲的身份与版本标识。
///
/// # 设计背景（Why）
/// - 外部缓存（例如解码后的属性表、上传到 GPU 的顶点流）需要判断某个缓冲自上次观察以来是否发生变化；
///   比较整块字节代价过高，因此以 `(buffer_id, update_count)` 作为轻量缓存键。
///
/// # 契约说明（What）
/// - `buffer_id`：由分配器/注册表指定的身份，默认 0；
/// - `update_count`：内容代际计数，默认 0。缓冲的任何内容修改都**不会**自动递增该值，
///   只有调用方通过 setter 或 [`bumped`](Self::bumped) 显式推进；
/// - 描述符是纯值类型，不持有指向缓冲的引用，可自由复制、比较与哈希。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferDescriptor {
    /// 缓冲身份。
    pub buffer_id: i64,
    /// 内容代际计数。
    pub update_count: i64,
}

impl BufferDescriptor {
    /// 以指定身份创建描述符，版本号从 0 开始。
    pub const fn new(buffer_id: i64) -> Self {
        Self {
            buffer_id,
            update_count: 0,
        }
    }

    /// 返回版本号加一后的副本，便于调用方在批量修改后统一“宣告新代际”。
    ///
    /// 计数达到 `i64::MAX` 时回绕，与缓存只比较相等性的用法一致。
    #[must_use]
    pub const fn bumped(self) -> Self {
        Self {
            buffer_id: self.buffer_id,
            update_count: self.update_count.wrapping_add(1),
        }
    }
}
