mod rules;

pub(crate) use rules::get;
