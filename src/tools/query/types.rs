/// A parsed launcher query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// No arguments: every site.
    All,
    /// One argument: a category name, or failing that a search term.
    Term(String),
    /// Two arguments: a search term scoped to one category.
    Scoped { category: String, term: String },
}

impl Query {
    /// Build a query from positional arguments. More than two arguments is
    /// not a query at all and yields `None`.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Option<Self> {
        match args {
            [] => Some(Query::All),
            [fi] => Some(Query::Term(fi.as_ref().to_string())),
            [fi, se] => Some(Query::Scoped {
                category: fi.as_ref().to_string(),
                term: se.as_ref().to_string(),
            }),
            _ => None,
        }
    }
}
