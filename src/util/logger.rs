use std::fmt::Debug;

use super::{Code, Trace};

impl Trace {
    /// Whether tracing at `stage` should print, given the configured level.
    fn enabled_for(&self, stage: Trace) -> bool {
        *self != Trace::Off && *self >= stage
    }

    #[cfg_attr(not(debug_assertions), allow(unused_variables))]
    pub fn token<T: Debug>(&self, code: &Code, pointer: usize, token: &T) {
        #[cfg(debug_assertions)]
        if self.enabled_for(Trace::Tokens) {
            println!("[token] {:?} @ {}", token, code.obtain_position(pointer));
        }
    }

    #[cfg_attr(not(debug_assertions), allow(unused_variables))]
    pub fn parse_step(&self, code: &Code, pointer: usize, message: &str) {
        #[cfg(debug_assertions)]
        if self.enabled_for(Trace::Parse) {
            println!("[parse] {} @ {}", message, code.obtain_position(pointer));
        }
    }

    #[cfg_attr(not(debug_assertions), allow(unused_variables))]
    pub fn dispatch(&self, name: &str, arity: usize) {
        #[cfg(debug_assertions)]
        if self.enabled_for(Trace::Eval) {
            println!("[eval] dispatch {} ({} args)", name, arity);
        }
    }
}
