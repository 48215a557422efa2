//! 核心宏定义
//!
//! 为配置和参数结构体提供统一的默认值实现

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use fire_sim::impl_default;
///
/// struct EmitterShape {
///     radius: f32,
///     height: f32,
/// }
///
/// impl_default!(EmitterShape {
///     radius: 0.3,
///     height: -1.5,
/// });
///
/// let shape = EmitterShape::default();
/// assert_eq!(shape.radius, 0.3);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    struct Band {
        lower: f32,
        upper: f32,
    }

    impl_default!(Band {
        lower: 0.4,
        upper: 0.7,
    });

    #[test]
    fn test_impl_default() {
        let band = Band::default();
        assert_eq!(band.lower, 0.4);
        assert_eq!(band.upper, 0.7);
    }
}
