//! Exclusive access to a shared engine.
//!
//! An [`Accelerator`] owns its engine behind an [`EngineMutex`]. The mutex is
//! per accelerator: holding one accelerator never blocks another. Which
//! mutex to use depends on the platform:
//!
//! - `std::sync::Mutex<E>` (with the `std` feature, the default): blocks
//!   other threads using the same accelerator.
//! - `embassy_sync::blocking_mutex::Mutex<M, RefCell<E>>`: any embassy
//!   [`RawMutex`], e.g. a HAL's interrupt-masking mutex or
//!   `CriticalSectionRawMutex`.
//! - `critical_section::Mutex<RefCell<E>>`: a global critical section. This
//!   also excludes every other critical-section user for as long as the
//!   engine runs.

use core::cell::RefCell;
use embassy_sync::blocking_mutex::{self, raw::RawMutex};

/// Mutex owning an engine.
pub trait EngineMutex<E> {
    /// Wrap `engine`.
    fn new(engine: E) -> Self;

    /// Run `f` with exclusive access to the engine.
    fn with_engine<R>(&self, f: impl FnOnce(&mut E) -> R) -> R;

    /// Give the engine back.
    fn into_engine(self) -> E;
}

#[cfg(feature = "std")]
impl<E> EngineMutex<E> for std::sync::Mutex<E> {
    fn new(engine: E) -> Self {
        std::sync::Mutex::new(engine)
    }

    fn with_engine<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        // Every section loads its own operands, so a poisoned engine is reusable.
        let mut engine = self.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut engine)
    }

    fn into_engine(self) -> E {
        self.into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<M: RawMutex, E> EngineMutex<E> for blocking_mutex::Mutex<M, RefCell<E>> {
    fn new(engine: E) -> Self {
        blocking_mutex::Mutex::new(RefCell::new(engine))
    }

    fn with_engine<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        self.lock(|engine| f(&mut engine.borrow_mut()))
    }

    fn into_engine(self) -> E {
        self.into_inner().into_inner()
    }
}

impl<E> EngineMutex<E> for critical_section::Mutex<RefCell<E>> {
    fn new(engine: E) -> Self {
        critical_section::Mutex::new(RefCell::new(engine))
    }

    fn with_engine<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        critical_section::with(|cs| f(&mut self.borrow_ref_mut(cs)))
    }

    fn into_engine(self) -> E {
        self.into_inner().into_inner()
    }
}

/// Mutex used by [`Accelerator::new`].
#[cfg(feature = "std")]
pub type DefaultMutex<E> = std::sync::Mutex<E>;

/// Mutex used by [`Accelerator::new`].
#[cfg(not(feature = "std"))]
pub type DefaultMutex<E> = critical_section::Mutex<RefCell<E>>;

/// Owner of a single engine instance.
///
/// Every dispatched operation runs its engine calls inside one
/// [`Accelerator::lock`] section, so multi-step sequences are atomic with
/// respect to other users of the same accelerator. Sections must not nest:
/// depending on the mutex, a nested section deadlocks or panics.
pub struct Accelerator<E, M = DefaultMutex<E>> {
    mutex: M,
    engine: core::marker::PhantomData<fn(E) -> E>,
}

impl<E> Accelerator<E, DefaultMutex<E>> {
    /// Take ownership of `engine`, guarded by the [`DefaultMutex`].
    pub fn new(engine: E) -> Self {
        Self::with_mutex(engine)
    }
}

impl<E, M: EngineMutex<E>> Accelerator<E, M> {
    /// Take ownership of `engine`, guarded by a mutex of type `M`.
    pub fn with_mutex(engine: E) -> Self {
        Self::from_mutex(M::new(engine))
    }

    /// Use an already constructed mutex, e.g. one built in a `static`.
    pub const fn from_mutex(mutex: M) -> Self {
        Self {
            mutex,
            engine: core::marker::PhantomData,
        }
    }

    /// Run `f` with exclusive access to the engine.
    pub fn lock<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        self.mutex.with_engine(|engine| {
            trace!("accelerator acquired");
            let result = f(engine);
            trace!("accelerator released");
            result
        })
    }

    /// Give the engine back.
    pub fn into_inner(self) -> E {
        self.mutex.into_engine()
    }
}
