mod predicates;
mod rules;
#[cfg(test)]
mod tests;

pub(crate) use rules::get;
