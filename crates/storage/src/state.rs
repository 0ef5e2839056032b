// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state from WAL replay

use tavern_core::{Module, Operation};

/// Module records built from WAL operations, in creation order
#[derive(Debug, Default, Clone)]
pub struct MaterializedState {
    pub modules: Vec<Module>,
}

impl MaterializedState {
    /// Rebuild state by applying operations in order
    pub fn from_operations<'a>(ops: impl IntoIterator<Item = &'a Operation>) -> Self {
        let mut state = Self::default();
        for op in ops {
            state.apply(op);
        }
        state
    }

    pub fn get_module(&self, library: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.library == library)
    }

    /// Apply an operation to update the state
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::ModuleCreate {
                library,
                created_at,
            } => {
                let module = Module::new(library.clone(), *created_at);
                match self.modules.iter_mut().find(|m| m.library == *library) {
                    Some(existing) => *existing = module,
                    None => self.modules.push(module),
                }
            }

            Operation::ModuleDelete { library } => {
                self.modules.retain(|m| m.library != *library);
            }
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
