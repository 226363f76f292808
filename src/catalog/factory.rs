use std::collections::HashMap;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::model::ResourceKind;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::catalog::dto::ResourceDto;
use crate::catalog::repository::mem_resource_repository::MemResourceRepository;
use crate::catalog::repository::ResourceRepository;
use crate::core::domain::Configuration;
use crate::core::lending::{LendingError, LendingResult};
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_notifier;

pub async fn create_resource_repository(store: RepositoryStore) -> Box<dyn ResourceRepository> {
    match store {
        RepositoryStore::Memory => {
            Box::new(MemResourceRepository::new())
        }
    }
}

pub async fn create_catalog_service(config: &Configuration, store: RepositoryStore) -> Box<dyn CatalogService> {
    let resource_repo = create_resource_repository(store).await;
    let notifier = create_notifier(store.notify_via()).await;
    Box::new(CatalogServiceImpl::new(config, resource_repo, notifier))
}

// Builds a resource from a type tag plus string attributes. An unrecognized
// tag or a missing/unparseable required attribute is a construction failure,
// unlike the recoverable domain-rule outcomes elsewhere.
pub fn build_resource(kind_tag: &str, attrs: &HashMap<String, String>) -> LendingResult<ResourceDto> {
    let title = required(attrs, "title")?;
    let subject = required(attrs, "subject")?;
    let kind = match kind_tag {
        "book" => ResourceKind::Book {
            author: required(attrs, "author")?,
            isbn: required(attrs, "isbn")?,
            page_count: required_i64(attrs, "page_count")?,
        },
        "dvd" => ResourceKind::Dvd {
            director: required(attrs, "director")?,
            runtime_minutes: required_i64(attrs, "runtime_minutes")?,
        },
        "ebook" => ResourceKind::Ebook {
            author: required(attrs, "author")?,
            format: required(attrs, "format")?,
            file_size_mb: required_f64(attrs, "file_size_mb")?,
        },
        other => {
            return Err(LendingError::validation(
                format!("unknown resource kind {}", other).as_str(), None));
        }
    };
    Ok(ResourceDto::new(title.as_str(), subject.as_str(), kind))
}

fn required(attrs: &HashMap<String, String>, key: &str) -> LendingResult<String> {
    attrs.get(key).cloned().ok_or_else(||
        LendingError::validation(format!("missing required attribute {}", key).as_str(), None))
}

fn required_i64(attrs: &HashMap<String, String>, key: &str) -> LendingResult<i64> {
    required(attrs, key)?.parse::<i64>().map_err(|_|
        LendingError::validation(format!("attribute {} must be an integer", key).as_str(), None))
}

fn required_f64(attrs: &HashMap<String, String>, key: &str) -> LendingResult<f64> {
    required(attrs, key)?.parse::<f64>().map_err(|_|
        LendingError::validation(format!("attribute {} must be a number", key).as_str(), None))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::catalog::domain::model::ResourceKind;
    use crate::catalog::factory::build_resource;

    fn book_attrs() -> HashMap<String, String> {
        HashMap::from([
            ("title".to_string(), "The Great Gatsby".to_string()),
            ("subject".to_string(), "Classic Literature".to_string()),
            ("author".to_string(), "F. Scott Fitzgerald".to_string()),
            ("isbn".to_string(), "978-0743273565".to_string()),
            ("page_count".to_string(), "180".to_string()),
        ])
    }

    #[tokio::test]
    async fn test_should_build_book_from_attributes() {
        let resource = build_resource("book", &book_attrs()).expect("should build book");
        assert_eq!("The Great Gatsby", resource.title.as_str());
        match resource.kind {
            ResourceKind::Book { ref isbn, page_count, .. } => {
                assert_eq!("978-0743273565", isbn.as_str());
                assert_eq!(180, page_count);
            }
            _ => panic!("expected a book"),
        }
    }

    #[tokio::test]
    async fn test_should_fail_on_unknown_kind_tag() {
        assert!(build_resource("vinyl", &book_attrs()).is_err());
    }

    #[tokio::test]
    async fn test_should_fail_on_missing_attribute() {
        let mut attrs = book_attrs();
        attrs.remove("isbn");
        assert!(build_resource("book", &attrs).is_err());
    }

    #[tokio::test]
    async fn test_should_fail_on_unparseable_attribute() {
        let mut attrs = book_attrs();
        attrs.insert("page_count".to_string(), "many".to_string());
        assert!(build_resource("book", &attrs).is_err());
    }
}
