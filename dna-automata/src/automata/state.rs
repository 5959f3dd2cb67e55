use std::fmt;

/// 自动机状态。
///
/// 相等与哈希完全由 `(name, is_final)` 决定，因此名称与终态标记相同的两个
/// 状态可以互换，直接用作转移表的键。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    name: String,
    is_final: bool,
}

impl State {
    pub fn new(name: impl Into<String>, is_final: bool) -> Self {
        Self { name: name.into(), is_final }
    }

    /// 非终态
    pub fn plain(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// 终态（接受态）
    pub fn accepting(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_final {
            write!(f, "({})", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}
