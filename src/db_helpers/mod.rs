mod article_helpers;
mod comment_helpers;
mod topic_helpers;
mod user_helpers;

pub use article_helpers::*;
pub use comment_helpers::*;
pub use topic_helpers::*;
pub use user_helpers::*;

/// Accumulates `column = ?` conditions for the values that are present,
/// keeping the bind order in step with the placeholders.
struct QueryBuilder {
    query: String,
    params: Vec<String>,
    seperator: &'static str,
}

impl QueryBuilder {
    fn new(initial: &str, seperator: &'static str) -> Self {
        Self {
            query: initial.to_owned(),
            params: vec![],
            seperator,
        }
    }

    fn add_param(mut self, filter: &str, param: Option<&str>) -> Self {
        if let Some(value) = param {
            if !self.params.is_empty() {
                self.query.push_str(self.seperator);
            }
            self.query.push_str(filter);
            self.query.push_str(" = ?");
            self.params.push(value.to_owned());
        }
        self
    }

    pub fn build(self) -> (String, Vec<String>) {
        if self.params.is_empty() {
            (String::new(), self.params)
        } else {
            (self.query, self.params)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QueryBuilder;

    #[test]
    fn no_params_builds_nothing() {
        let (query, params) = QueryBuilder::new(" WHERE ", " AND ")
            .add_param("articles.topic", None)
            .build();
        assert_eq!(query, "");
        assert!(params.is_empty());
    }

    #[test]
    fn params_are_joined_in_order() {
        let (query, params) = QueryBuilder::new(" WHERE ", " AND ")
            .add_param("articles.topic", Some("cats"))
            .add_param("articles.author", None)
            .add_param("articles.title", Some("A"))
            .build();
        assert_eq!(query, " WHERE articles.topic = ? AND articles.title = ?");
        assert_eq!(params, vec!["cats".to_string(), "A".to_string()]);
    }
}
