#[macro_export]
macro_rules! regex {
    ($pat:expr) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`ContextPair`](crate::ContextPair) from two static patterns.
#[macro_export]
macro_rules! ctx {
    ($before:expr, $after:expr $(,)?) => {
        $crate::ContextPair::new($crate::regex!($before).clone(), $crate::regex!($after).clone())
    };
}

#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        pattern: $pattern:expr,
        replace: $replace:expr
        $(, requires: $requires:expr)?
        $(, contexts: [ $($ctx:expr),* $(,)? ])?
        $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut entry = $crate::RuleEntry::new($name, $pattern, $replace);
        $(entry = entry.requires($requires);)?
        $(entry = entry.with_contexts(vec![ $($ctx),* ]);)?
        entry
    }};
}
