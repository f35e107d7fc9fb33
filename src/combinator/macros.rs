//! Macros for building pipelines and juxtapositions.

/// Builds a [`Pipeline`](crate::combinator::Pipeline) from asynchronous steps,
/// applied left to right.
///
/// `compose_async!(f, g, h)` is `Pipeline::new().then(f).then(g).then(h)`.
/// `compose_async!()` is the empty pipeline, which resolves with its input.
///
/// # Examples
///
/// ```
/// use functools::compose_async;
/// use functools::control::Continuation;
///
/// let add_one = |x: i32, k: Continuation<i32, String>| k.succeed(x + 1);
/// let double = |x: i32, k: Continuation<i32, String>| k.succeed(x * 2);
///
/// // (5 + 1) * 2
/// compose_async!(add_one, double).call(5, |result| assert_eq!(result, Ok(12)));
/// ```
///
/// ## Halting on the first error
///
/// ```
/// use functools::compose_async;
/// use functools::control::Continuation;
///
/// let add_one = |x: i32, k: Continuation<i32, String>| k.succeed(x + 1);
/// let reject = |_: i32, k: Continuation<i32, String>| k.fail("rejected".to_string());
///
/// compose_async!(add_one, reject, add_one).call(1, |result| {
///     let halted = result.unwrap_err();
///     assert_eq!(halted.error, "rejected");
///     assert_eq!(halted.partial, 2);
/// });
/// ```
#[macro_export]
macro_rules! compose_async {
    () => {
        $crate::combinator::Pipeline::new()
    };

    ($($step:expr),+ $(,)?) => {
        $crate::combinator::Pipeline::new()$(.then($step))+
    };
}

/// Builds a list-shaped [`JuxtAsync`](crate::combinator::JuxtAsync).
///
/// Every function takes the same argument type and resumes with the same
/// result and error types.
///
/// # Examples
///
/// ```
/// use functools::juxt_async;
/// use functools::control::Continuation;
///
/// let stats = juxt_async![
///     |x: i32, k: Continuation<i32, String>| k.succeed(x * x * x),
///     |x: i32, k: Continuation<i32, String>| k.succeed(x + x),
///     |x: i32, k: Continuation<i32, String>| k.succeed(x / 2),
///     |x: i32, k: Continuation<i32, String>| k.succeed(x * 3),
/// ];
///
/// stats.call(2, |result| assert_eq!(result, Ok(vec![8, 4, 1, 6])));
/// ```
#[macro_export]
macro_rules! juxt_async {
    ($($function:expr),* $(,)?) => {
        $crate::combinator::JuxtAsync::new(::std::vec![
            $($crate::combinator::async_fn($function)),*
        ])
    };
}
