//! Binding destinations for options and positional arguments.
//!
//! Every option and positional argument is bound to a [`Binding`], a shared
//! handle to something implementing [`Bind`]. The usual destination is a
//! [`Slot`]: the caller keeps a clone of the slot in its own configuration
//! type and reads the value back once resolution is over.
//!
//! # Examples
//!
//! ```
//! use command_binder_core::{Bind, Slot};
//!
//! let verbose: Slot<bool> = Slot::default();
//! let binding = verbose.binding();
//! assert!(!binding.takes_value());
//!
//! binding.set(None).unwrap();
//! assert!(verbose.get());
//! assert!(verbose.is_set());
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

use thiserror::Error;

/// Errors raised when a binding rejects its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The destination needs a value but none was supplied.
    #[error("expected a value")]
    MissingValue,
    /// The supplied text does not convert to the destination type.
    #[error("invalid value `{value}` for {expected}: {reason}")]
    Invalid {
        /// The raw text that was rejected.
        value: String,
        /// Name of the destination type.
        expected: &'static str,
        /// Conversion error message.
        reason: String,
    },
    /// A callback destination refused to run.
    #[error("{0}")]
    Rejected(String),
}

/// Something an option or positional argument can write into.
pub trait Bind: fmt::Debug {
    /// Whether the destination consumes a value (`--name value`) or is a
    /// plain switch.
    fn takes_value(&self) -> bool;

    /// Stores `raw` in the destination. Switches receive `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] if the input is missing or does not convert.
    fn set(&self, raw: Option<&str>) -> Result<(), ValueError>;

    /// Whether [`set`](Bind::set) has succeeded at least once.
    fn is_set(&self) -> bool;
}

/// Shared handle to a binding destination.
pub type Binding = Rc<dyn Bind>;

/// Types that can be assigned from command-line text.
pub trait ArgValue: fmt::Debug {
    /// `false` for switches that are set by their mere presence.
    const TAKES_VALUE: bool = true;

    /// Assigns `raw` to `self`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] if the input is missing or does not convert.
    fn assign(&mut self, raw: Option<&str>) -> Result<(), ValueError>;
}

impl ArgValue for bool {
    const TAKES_VALUE: bool = false;

    fn assign(&mut self, raw: Option<&str>) -> Result<(), ValueError> {
        *self = match raw {
            None => true,
            Some(text) => text.parse().map_err(|err| ValueError::Invalid {
                value: text.to_string(),
                expected: "bool",
                reason: format!("{err}"),
            })?,
        };
        Ok(())
    }
}

macro_rules! from_str_value {
    ($($ty:ty),* $(,)?) => {$(
        impl ArgValue for $ty {
            fn assign(&mut self, raw: Option<&str>) -> Result<(), ValueError> {
                let text = raw.ok_or(ValueError::MissingValue)?;
                *self = text.parse().map_err(|err| ValueError::Invalid {
                    value: text.to_string(),
                    expected: stringify!($ty),
                    reason: format!("{err}"),
                })?;
                Ok(())
            }
        }
    )*};
}

from_str_value!(
    String, PathBuf, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char
);

impl<T: ArgValue + Default> ArgValue for Option<T> {
    const TAKES_VALUE: bool = T::TAKES_VALUE;

    fn assign(&mut self, raw: Option<&str>) -> Result<(), ValueError> {
        let mut inner = T::default();
        inner.assign(raw)?;
        *self = Some(inner);
        Ok(())
    }
}

impl<T: ArgValue + Default> ArgValue for Vec<T> {
    const TAKES_VALUE: bool = T::TAKES_VALUE;

    fn assign(&mut self, raw: Option<&str>) -> Result<(), ValueError> {
        let mut item = T::default();
        item.assign(raw)?;
        self.push(item);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct SlotState<T> {
    value: T,
    set: bool,
}

/// Typed, shared destination cell.
///
/// Clones share the same storage. Slots are single-threaded; a tree and the
/// slots bound into it stay on the thread that built them.
#[derive(Debug, Default)]
pub struct Slot<T>(Rc<RefCell<SlotState<T>>>);

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: ArgValue + 'static> Slot<T> {
    /// Creates a slot holding an initial value.
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(SlotState { value, set: false })))
    }

    /// Returns a binding handle writing into this slot.
    pub fn binding(&self) -> Binding {
        Rc::new(self.clone())
    }

    /// Runs `f` against the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }
}

impl<T: Clone> Slot<T> {
    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.0.borrow().value.clone()
    }
}

impl<T: ArgValue> Bind for Slot<T> {
    fn takes_value(&self) -> bool {
        T::TAKES_VALUE
    }

    fn set(&self, raw: Option<&str>) -> Result<(), ValueError> {
        let mut state = self.0.borrow_mut();
        state.value.assign(raw)?;
        state.set = true;
        Ok(())
    }

    fn is_set(&self) -> bool {
        self.0.borrow().set
    }
}

/// Function type run by a [`Callback`] destination.
pub type CallbackFn = Rc<dyn Fn() -> Result<(), ValueError>>;

/// Destination that runs a function instead of storing a value.
#[derive(Clone)]
pub struct Callback {
    run: CallbackFn,
    fired: Rc<Cell<bool>>,
}

impl Callback {
    /// Wraps `run`.
    pub fn new(run: CallbackFn) -> Self {
        Self {
            run,
            fired: Rc::new(Cell::new(false)),
        }
    }

    /// Returns a binding handle that triggers this callback.
    pub fn binding(&self) -> Binding {
        Rc::new(self.clone())
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("fired", &self.fired.get())
            .finish_non_exhaustive()
    }
}

impl Bind for Callback {
    fn takes_value(&self) -> bool {
        false
    }

    fn set(&self, _raw: Option<&str>) -> Result<(), ValueError> {
        (self.run)()?;
        self.fired.set(true);
        Ok(())
    }

    fn is_set(&self) -> bool {
        self.fired.get()
    }
}
