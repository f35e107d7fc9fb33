//! The sequential driver behind every asynchronous traversal.
//!
//! One invocation is one state machine:
//!
//! ```text
//! Idle -> Stepping(k) -> Stepping(k + 1) | Halted(error) | Done
//! ```
//!
//! The driver invokes the step for one input at a time. Only that step's
//! continuation advances the machine, so step `k + 1` never starts before
//! step `k` has resumed. What gets recorded and what the outer callback
//! receives is decided by a [`Policy`].
//!
//! A continuation resumed synchronously, while the step is still on the
//! stack, is parked in the machine and picked up by the loop once the step
//! returns. Long runs of synchronous steps therefore iterate instead of
//! recursing. A continuation resumed later re-enters the loop itself.

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use super::{Continuation, Outcome};

/// The accumulation policy of one traversal combinator.
pub(crate) trait Policy: 'static {
    /// What the step receives for one position.
    type Input: 'static;
    /// What the step reports through its continuation.
    type Output: 'static;
    /// The step's error.
    type Error: 'static;
    /// What the outer callback receives.
    type Finished;

    /// Pulls the next input, or `None` when every position was visited.
    fn next(&mut self) -> Option<Self::Input>;

    /// Records the outcome for the position last handed out by `next`.
    fn record(&mut self, outcome: Outcome<Self::Output, Self::Error>) -> ControlFlow<Self::Error>;

    /// Builds the final value; `halt` is the error that stopped the traversal.
    fn finish(self, halt: Option<Self::Error>) -> Self::Finished;
}

enum Phase<T, E> {
    Idle,
    /// The step is on the stack and has not resumed yet.
    Stepping,
    /// The step resumed before returning.
    Resumed(Outcome<T, E>),
    /// The step returned; its continuation is still pending.
    Waiting,
    Finished,
}

struct Machine<P: Policy, S, D> {
    policy: Option<P>,
    step: Option<S>,
    done: Option<D>,
    phase: Phase<P::Output, P::Error>,
    position: usize,
}

struct Driver<P: Policy, S, D> {
    machine: Rc<RefCell<Machine<P, S, D>>>,
}

/// Runs `step` over every input `policy` yields and hands the result to `done`.
///
/// `done` is called exactly once: after the last input, after the first
/// failure, or immediately when there is no input at all.
pub(crate) fn drive<P, S, D>(policy: P, step: S, done: D)
where
    P: Policy,
    S: FnMut(P::Input, Continuation<P::Output, P::Error>) + 'static,
    D: FnOnce(P::Finished) + 'static,
{
    let driver = Driver {
        machine: Rc::new(RefCell::new(Machine {
            policy: Some(policy),
            step: Some(step),
            done: Some(done),
            phase: Phase::Idle,
            position: 0,
        })),
    };
    driver.advance();
}

impl<P, S, D> Driver<P, S, D>
where
    P: Policy,
    S: FnMut(P::Input, Continuation<P::Output, P::Error>) + 'static,
    D: FnOnce(P::Finished) + 'static,
{
    fn advance(&self) {
        loop {
            let next = {
                let mut machine = self.machine.borrow_mut();
                match machine.policy.as_mut().and_then(|policy| policy.next()) {
                    Some(input) => {
                        machine.phase = Phase::Stepping;
                        tracing::trace!(position = machine.position, "invoking step");
                        machine.step.take().map(|step| (input, step))
                    }
                    None => None,
                }
            };
            let Some((input, mut step)) = next else {
                self.finish(None);
                return;
            };

            let continuation = {
                let driver = Self {
                    machine: Rc::clone(&self.machine),
                };
                Continuation::new(move |outcome| driver.resume(outcome))
            };
            step(input, continuation);

            let outcome = {
                let mut machine = self.machine.borrow_mut();
                machine.step = Some(step);
                match std::mem::replace(&mut machine.phase, Phase::Waiting) {
                    Phase::Resumed(outcome) => {
                        machine.phase = Phase::Idle;
                        outcome
                    }
                    _ => {
                        tracing::trace!(position = machine.position, "step suspended");
                        return;
                    }
                }
            };
            if self.settle(outcome).is_break() {
                return;
            }
        }
    }

    fn resume(&self, outcome: Outcome<P::Output, P::Error>) {
        {
            let mut machine = self.machine.borrow_mut();
            match std::mem::replace(&mut machine.phase, Phase::Idle) {
                Phase::Stepping => {
                    machine.phase = Phase::Resumed(outcome);
                    return;
                }
                Phase::Waiting => {}
                other => {
                    machine.phase = other;
                    return;
                }
            }
            tracing::trace!(position = machine.position, "deferred step resumed");
        }
        if self.settle(outcome).is_continue() {
            self.advance();
        }
    }

    fn settle(&self, outcome: Outcome<P::Output, P::Error>) -> ControlFlow<()> {
        let flow = {
            let mut machine = self.machine.borrow_mut();
            machine.position += 1;
            match machine.policy.as_mut() {
                Some(policy) => policy.record(outcome),
                None => return ControlFlow::Break(()),
            }
        };
        match flow {
            ControlFlow::Continue(()) => ControlFlow::Continue(()),
            ControlFlow::Break(error) => {
                self.finish(Some(error));
                ControlFlow::Break(())
            }
        }
    }

    fn finish(&self, halt: Option<P::Error>) {
        let parts = {
            let mut machine = self.machine.borrow_mut();
            machine.phase = Phase::Finished;
            machine.step = None;
            tracing::trace!(
                visited = machine.position,
                halted = halt.is_some(),
                "traversal finished"
            );
            machine.policy.take().zip(machine.done.take())
        };
        if let Some((policy, done)) = parts {
            done(policy.finish(halt));
        }
    }
}
