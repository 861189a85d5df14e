//! Single-assignment deferred values.
//!
//! A [`Deferred`] is the read side of a value that is settled exactly once,
//! either fulfilled or rejected, through its paired [`Resolver`]. Any number of
//! observers can clone the handle and await it; every observer sees the same
//! outcome no matter when it attaches.

use crate::utils::error::{PrimerError, Result};
use futures::future::{self, BoxFuture, FutureExt};
use std::convert::Infallible;
use std::fmt;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement<T, E> {
    Pending,
    Fulfilled(T),
    Rejected(E),
}

impl<T, E> Settlement<T, E> {
    pub fn state(&self) -> DeferredState {
        match self {
            Settlement::Pending => DeferredState::Pending,
            Settlement::Fulfilled(_) => DeferredState::Fulfilled,
            Settlement::Rejected(_) => DeferredState::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredState {
    Pending,
    Fulfilled,
    Rejected,
}

/// 建立一組尚未 settle 的 (resolver, handle)
pub fn deferred<T, E>() -> (Resolver<T, E>, Deferred<T, E>) {
    let (tx, rx) = watch::channel(Settlement::Pending);
    (Resolver { tx: Arc::new(tx) }, Deferred { rx })
}

/// 寫入端：只有第一次 fulfill / reject 會生效
#[derive(Debug)]
pub struct Resolver<T, E> {
    tx: Arc<watch::Sender<Settlement<T, E>>>,
}

impl<T, E> Clone for Resolver<T, E> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T, E> Resolver<T, E> {
    pub fn fulfill(&self, value: T) -> Result<()> {
        self.settle(Settlement::Fulfilled(value))
    }

    pub fn reject(&self, error: E) -> Result<()> {
        self.settle(Settlement::Rejected(error))
    }

    pub fn is_settled(&self) -> bool {
        !matches!(*self.tx.borrow(), Settlement::Pending)
    }

    fn settle(&self, outcome: Settlement<T, E>) -> Result<()> {
        let settled = self.tx.send_if_modified(|current| {
            if matches!(current, Settlement::Pending) {
                *current = outcome;
                true
            } else {
                false
            }
        });

        if settled {
            Ok(())
        } else {
            Err(PrimerError::AlreadySettled)
        }
    }
}

/// 讀取端，可以任意 clone
#[derive(Debug)]
pub struct Deferred<T, E> {
    rx: watch::Receiver<Settlement<T, E>>,
}

impl<T, E> Clone for Deferred<T, E> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T, E> Deferred<T, E> {
    pub fn state(&self) -> DeferredState {
        self.rx.borrow().state()
    }

    pub fn is_pending(&self) -> bool {
        self.state() == DeferredState::Pending
    }
}

impl<T: Clone, E: Clone> Deferred<T, E> {
    /// Returns the outcome if the handle has already settled.
    pub fn peek(&self) -> Option<std::result::Result<T, E>> {
        match &*self.rx.borrow() {
            Settlement::Pending => None,
            Settlement::Fulfilled(value) => Some(Ok(value.clone())),
            Settlement::Rejected(error) => Some(Err(error.clone())),
        }
    }

    /// Waits until the handle settles.
    ///
    /// A handle whose resolver is dropped before settling never completes,
    /// the same way a promise that nobody resolves stays pending.
    pub async fn outcome(&self) -> std::result::Result<T, E> {
        let mut rx = self.rx.clone();
        let settled = rx
            .wait_for(|current| !matches!(current, Settlement::Pending))
            .await
            .map(|current| (*current).clone());

        match settled {
            Ok(Settlement::Fulfilled(value)) => Ok(value),
            Ok(Settlement::Rejected(error)) => Err(error),
            _ => future::pending().await,
        }
    }
}

impl<T: Clone> Deferred<T, Infallible> {
    pub async fn value(&self) -> T {
        match self.outcome().await {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}

impl<T, E> IntoFuture for Deferred<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output = std::result::Result<T, E>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        async move { self.outcome().await }.boxed()
    }
}

impl<T: fmt::Display, E: fmt::Display> fmt::Display for Deferred<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.rx.borrow() {
            Settlement::Pending => write!(f, "Promise {{ <pending> }}"),
            Settlement::Fulfilled(value) => write!(f, "Promise {{ {} }}", value),
            Settlement::Rejected(error) => write!(f, "Promise {{ <rejected> {} }}", error),
        }
    }
}
