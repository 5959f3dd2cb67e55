//! 有限自动机核心。
//!
//! - [`State`] — 以 `(name, is_final)` 作为值语义标识的不可变状态
//! - [`Alphabet`] — 构造期用于校验输入符号的有限字母表
//! - [`Dfa`] — 稀疏转移表的确定性有限自动机，缺失转移即拒绝
//! - [`Pda`] — 带符号栈的下推自动机，非确定转移按注册顺序取第一条
//!
//! 所有校验都在构造期完成；构造完成后 `process` 只读，可被多个线程并发调用。

pub mod alphabet;
pub mod dfa;
pub mod error;
pub mod pda;
pub mod state;

pub use alphabet::Alphabet;
pub use dfa::Dfa;
pub use error::{AutomatonError, Result};
pub use pda::{Pda, StackAction, STACK_BOTTOM};
pub use state::State;
