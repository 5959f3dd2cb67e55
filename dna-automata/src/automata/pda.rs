use std::collections::{HashMap, HashSet};

use super::{Alphabet, AutomatonError, Result, State};

/// 栈底标记，每次运行开始时栈中只有它。
pub const STACK_BOTTOM: u8 = b'Z';

/// 一条转移对栈的操作：弹出栈顶，或压入一个符号（二者互斥）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackAction {
    Pop,
    Push(u8),
}

/// 下推自动机。
///
/// 转移键为 `(state, input_symbol, stack_top)`，同一键下可以登记多条候选转移
/// （按登记顺序追加）。运行时**总是选择第一条**：这是确定性的 first-match
/// 策略，不做回溯搜索，改成回溯会改变被接受的语言。
///
/// 栈只存在于单次 `process` 调用内部，自动机本身不持有运行状态，
/// 因此 `&Pda` 可以被多个线程同时使用。
#[derive(Debug, Clone)]
pub struct Pda {
    input_alphabet: Alphabet,
    stack_alphabet: Alphabet,
    states: HashSet<State>,
    transitions: HashMap<State, HashMap<(u8, u8), Vec<(State, StackAction)>>>,
    initial_state: Option<State>,
    final_states: HashSet<State>,
}

impl Pda {
    /// 栈字母表总是包含 [`STACK_BOTTOM`]。
    pub fn new(input_alphabet: Alphabet, mut stack_alphabet: Alphabet) -> Self {
        stack_alphabet.insert(STACK_BOTTOM);
        Self {
            input_alphabet,
            stack_alphabet,
            states: HashSet::new(),
            transitions: HashMap::new(),
            initial_state: None,
            final_states: HashSet::new(),
        }
    }

    /// 匹配成对嵌套符号的 PDA，例如 `open = b'('`, `close = b')'`。
    ///
    /// 单一状态 `q0` 既是初始态也是终态：读到 `open` 压栈，读到 `close` 弹栈，
    /// 输入读完且栈回到栈底时接受。空输入视为平衡。
    pub fn balanced(open: u8, close: u8) -> Result<Self> {
        let mut pda = Self::new(Alphabet::new([open, close]), Alphabet::new([open]));
        let q0 = State::accepting("q0");
        pda.add_state(q0.clone());
        pda.set_initial_state(&q0)?;
        pda.add_transition(&q0, open, STACK_BOTTOM, &q0, StackAction::Push(open))?;
        pda.add_transition(&q0, open, open, &q0, StackAction::Push(open))?;
        pda.add_transition(&q0, close, open, &q0, StackAction::Pop)?;
        Ok(pda)
    }

    pub fn add_state(&mut self, state: State) {
        if state.is_final() {
            self.final_states.insert(state.clone());
        }
        self.states.insert(state);
    }

    /// 追加一条候选转移；同一键下的已有转移保持不变。
    ///
    /// 依次校验：输入符号（`InvalidSymbol`）、栈顶与压栈符号（`InvalidStackSymbol`）、
    /// `from` / `to` 是否已注册（`UnknownState`）。
    pub fn add_transition(
        &mut self,
        from: &State,
        input_symbol: u8,
        stack_top: u8,
        to: &State,
        action: StackAction,
    ) -> Result<()> {
        if !self.input_alphabet.contains(input_symbol) {
            return Err(AutomatonError::InvalidSymbol(input_symbol));
        }
        if !self.stack_alphabet.contains(stack_top) {
            return Err(AutomatonError::InvalidStackSymbol(stack_top));
        }
        if let StackAction::Push(sym) = action {
            if !self.stack_alphabet.contains(sym) {
                return Err(AutomatonError::InvalidStackSymbol(sym));
            }
        }
        self.require_state(from)?;
        self.require_state(to)?;
        self.transitions
            .entry(from.clone())
            .or_default()
            .entry((input_symbol, stack_top))
            .or_default()
            .push((to.clone(), action));
        Ok(())
    }

    pub fn set_initial_state(&mut self, state: &State) -> Result<()> {
        self.require_state(state)?;
        self.initial_state = Some(state.clone());
        Ok(())
    }

    /// 运行一次。接受条件：到达终态，且栈中恰好只剩栈底标记。
    ///
    /// 输入中的符号不做字母表校验：字母表外的符号找不到转移，直接拒绝。
    /// 栈被弹空后若仍有输入，同样拒绝。
    pub fn process(&self, sequence: &[u8]) -> Result<bool> {
        let mut current = self.initial_state.as_ref().ok_or(AutomatonError::NoInitialState)?;
        let mut stack = vec![STACK_BOTTOM];

        for &symbol in sequence {
            let Some(&top) = stack.last() else {
                return Ok(false);
            };
            let Some((next, action)) = self.candidates(current, symbol, top).first() else {
                return Ok(false);
            };
            match *action {
                StackAction::Pop => {
                    stack.pop();
                }
                StackAction::Push(sym) => stack.push(sym),
            }
            current = next;
        }

        Ok(self.final_states.contains(current) && stack == [STACK_BOTTOM])
    }

    /// 某个键下按登记顺序排列的全部候选转移；无转移时为空切片。
    pub fn candidates(&self, from: &State, input_symbol: u8, stack_top: u8) -> &[(State, StackAction)] {
        self.transitions
            .get(from)
            .and_then(|by_key| by_key.get(&(input_symbol, stack_top)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn input_alphabet(&self) -> &Alphabet {
        &self.input_alphabet
    }

    pub fn stack_alphabet(&self) -> &Alphabet {
        &self.stack_alphabet
    }

    pub fn states(&self) -> &HashSet<State> {
        &self.states
    }

    pub fn initial_state(&self) -> Option<&State> {
        self.initial_state.as_ref()
    }

    fn require_state(&self, state: &State) -> Result<()> {
        if self.states.contains(state) {
            Ok(())
        } else {
            Err(AutomatonError::UnknownState(state.name().to_string()))
        }
    }
}
