use std::collections::{HashMap, HashSet};

use super::{Alphabet, AutomatonError, Result, State};

/// 确定性有限自动机。
///
/// 转移函数可以是部分函数：`(state, symbol)` 没有登记的转移时，
/// `process` 立即拒绝，不再读取剩余符号。
///
/// 构造（`add_state` / `add_transition` / `set_initial_state`）完成后，
/// `process` 只读取自身，可以在多个线程间共享 `&Dfa` 并发调用。
#[derive(Debug, Clone)]
pub struct Dfa {
    alphabet: Alphabet,
    states: HashSet<State>,
    /// 按源状态分桶，查找时直接以 `&State` 借用，无需克隆
    transitions: HashMap<State, HashMap<u8, State>>,
    initial_state: Option<State>,
    final_states: HashSet<State>,
}

impl Dfa {
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            states: HashSet::new(),
            transitions: HashMap::new(),
            initial_state: None,
            final_states: HashSet::new(),
        }
    }

    /// 注册状态；终态同时加入终态集合。重复注册无副作用。
    pub fn add_state(&mut self, state: State) {
        if state.is_final() {
            self.final_states.insert(state.clone());
        }
        self.states.insert(state);
    }

    /// 登记 `(from, symbol) -> to`。同一键重复登记时后写覆盖先写。
    ///
    /// 符号不在字母表中返回 `InvalidSymbol`；`from` 或 `to` 未经 `add_state` 注册
    /// 返回 `UnknownState`（先校验符号）。
    pub fn add_transition(&mut self, from: &State, symbol: u8, to: &State) -> Result<()> {
        if !self.alphabet.contains(symbol) {
            return Err(AutomatonError::InvalidSymbol(symbol));
        }
        self.require_state(from)?;
        self.require_state(to)?;
        self.transitions
            .entry(from.clone())
            .or_default()
            .insert(symbol, to.clone());
        Ok(())
    }

    pub fn set_initial_state(&mut self, state: &State) -> Result<()> {
        self.require_state(state)?;
        self.initial_state = Some(state.clone());
        Ok(())
    }

    /// 从初始状态起逐个读取符号；全部读完后当前状态为终态则接受。
    pub fn process(&self, sequence: &[u8]) -> Result<bool> {
        let mut current = self.initial_state.as_ref().ok_or(AutomatonError::NoInitialState)?;
        for &symbol in sequence {
            match self.transition(current, symbol) {
                Some(next) => current = next,
                None => return Ok(false),
            }
        }
        Ok(self.final_states.contains(current))
    }

    /// 查找转移；`None` 表示无转移（拒绝）。
    #[inline]
    pub fn transition(&self, from: &State, symbol: u8) -> Option<&State> {
        self.transitions.get(from)?.get(&symbol)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn states(&self) -> &HashSet<State> {
        &self.states
    }

    pub fn final_states(&self) -> &HashSet<State> {
        &self.final_states
    }

    pub fn initial_state(&self) -> Option<&State> {
        self.initial_state.as_ref()
    }

    /// 已登记的转移总数
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(HashMap::len).sum()
    }

    fn require_state(&self, state: &State) -> Result<()> {
        if self.states.contains(state) {
            Ok(())
        } else {
            Err(AutomatonError::UnknownState(state.name().to_string()))
        }
    }
}
