use std::sync::Arc;

mod support;

use support::*;
use wiredesk::application::commands::{RequestTranslationCommand, TranslationCommandService};
use wiredesk::application::error::ApplicationError;
use wiredesk::domain::article::UserId;

fn service(
    articles: Arc<InMemoryArticles>,
    provider: Arc<ScriptedProvider>,
) -> TranslationCommandService {
    TranslationCommandService::new(articles.clone(), articles, provider, Arc::new(FixedClock))
}

fn command(article_id: &str, requested_by: Option<i64>) -> RequestTranslationCommand {
    RequestTranslationCommand {
        article_id: article_id.into(),
        requested_by,
    }
}

#[tokio::test]
async fn links_the_returned_document_id() {
    let articles = Arc::new(InMemoryArticles::with([ArticleBuilder::new("urn:1").build()]));
    let provider = Arc::new(ScriptedProvider::new().submitting("doc-9"));

    let id = service(articles.clone(), provider.clone())
        .request_translation(command("urn:1", None))
        .await
        .unwrap();

    assert_eq!(id.as_deref(), Some("doc-9"));
    assert_eq!(provider.submitted(), vec!["urn:1".to_owned()]);
    let article = articles.get("urn:1");
    assert_eq!(article.extra.translation_id(), Some("doc-9"));
    assert_eq!(article.modified_at, fixed_now());
    let writes = articles.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].1, None);
    assert!(writes[0].0.body_html.is_none(), "body is left alone");
}

#[tokio::test]
async fn editor_requests_are_attributed() {
    let articles = Arc::new(InMemoryArticles::with([ArticleBuilder::new("urn:1").build()]));
    let provider = Arc::new(ScriptedProvider::new().submitting("doc-9"));

    service(articles.clone(), provider)
        .request_translation(command("urn:1", Some(4)))
        .await
        .unwrap();

    assert_eq!(articles.writes()[0].1, Some(UserId(4)));
}

#[tokio::test]
async fn already_linked_article_is_not_resubmitted() {
    let articles = Arc::new(InMemoryArticles::with([ArticleBuilder::new("urn:1")
        .translation_id("doc-1")
        .build()]));
    let provider = Arc::new(ScriptedProvider::new().submitting("doc-9"));

    let id = service(articles.clone(), provider.clone())
        .request_translation(command("urn:1", None))
        .await
        .unwrap();

    assert_eq!(id.as_deref(), Some("doc-1"));
    assert!(provider.submitted().is_empty());
    assert!(articles.writes().is_empty());
}

#[tokio::test]
async fn article_without_body_is_a_no_op() {
    let articles = Arc::new(InMemoryArticles::with([ArticleBuilder::new("urn:1")
        .with(|a| a.body_html = None)
        .build()]));
    let provider = Arc::new(ScriptedProvider::new().submitting("doc-9"));

    let id = service(articles.clone(), provider)
        .request_translation(command("urn:1", None))
        .await
        .unwrap();

    assert_eq!(id, None);
    assert!(articles.writes().is_empty());
}

#[tokio::test]
async fn unknown_article_is_not_found() {
    let articles = Arc::new(InMemoryArticles::default());
    let provider = Arc::new(ScriptedProvider::new());

    let err = service(articles, provider)
        .request_translation(command("urn:missing", None))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn invalid_editor_id_is_rejected() {
    let articles = Arc::new(InMemoryArticles::with([ArticleBuilder::new("urn:1").build()]));
    let provider = Arc::new(ScriptedProvider::new().submitting("doc-9"));

    let err = service(articles, provider)
        .request_translation(command("urn:1", Some(0)))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Domain(_)));
}
