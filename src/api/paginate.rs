//! Lazy walking of page-based collection endpoints.

use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use super::error::{ApiError, FetchResult, PartialFetch};
use super::session::{Session, Subject, decode};
use super::transport::{Method, Transport};

/// One page of a collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<E> {
    #[serde(default = "Vec::new")]
    pub items: Vec<E>,
    #[serde(default)]
    pub has_more: bool,
}

/// Iterator over the pages of one collection, starting at page 1.
///
/// Each call to `next` issues at most one request. The walk ends after the
/// first page whose `has_more` flag is false, or right after an error. No
/// page-count cap is applied: a service that always reports more pages
/// keeps the iterator going until the caller stops or cancels.
pub struct Pages<'s, T: Transport, E> {
    session: &'s Session<T>,
    path: String,
    params: Vec<(String, String)>,
    subject: Option<Subject>,
    next_page: Option<u32>,
    _entity: PhantomData<fn() -> E>,
}

impl<'s, T: Transport, E> Pages<'s, T, E> {
    pub(crate) fn new(
        session: &'s Session<T>,
        path: String,
        params: Vec<(String, String)>,
        subject: Option<Subject>,
    ) -> Self {
        Self {
            session,
            path,
            params,
            subject,
            next_page: Some(1),
            _entity: PhantomData,
        }
    }

    /// The page number the next call to `next` will request.
    pub fn next_page(&self) -> Option<u32> {
        self.next_page
    }
}

impl<T, E> Iterator for Pages<'_, T, E>
where
    T: Transport,
    E: DeserializeOwned,
{
    type Item = Result<Page<E>, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.next_page.take()?;

        let request = self
            .session
            .request(Method::Get, &self.path)
            .params(self.params.iter().cloned())
            .param("page", page.to_string());

        let result = self
            .session
            .execute(request, self.subject.as_ref())
            .and_then(decode::<Page<E>>);

        if let Ok(fetched) = &result {
            debug!(
                "event=page_fetched path={} page={} items={} has_more={}",
                self.path,
                page,
                fetched.items.len(),
                fetched.has_more
            );
            if fetched.has_more {
                self.next_page = Some(page + 1);
            }
        }

        Some(result)
    }
}

/// Walks `pages` to completion, concatenating items in server order.
///
/// On the first failing page the walk stops and the items gathered so far
/// are returned with the error.
pub fn collect_all<E, I>(pages: I) -> FetchResult<E>
where
    I: IntoIterator<Item = Result<Page<E>, ApiError>>,
{
    let mut items = Vec::new();
    for page in pages {
        match page {
            Ok(page) => items.extend(page.items),
            Err(error) => return Err(PartialFetch { items, error }),
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;
    use crate::api::{CancelToken, ListQuery, SortOrder};
    use crate::domain::Tag;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tag_page(titles: &[&str], has_more: bool) -> serde_json::Value {
        let items: Vec<_> = titles
            .iter()
            .map(|t| json!({ "id": format!("id-{t}"), "title": t }))
            .collect();
        json!({ "items": items, "has_more": has_more })
    }

    fn titles(tags: &[Tag]) -> Vec<&str> {
        tags.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn walks_all_pages_in_order() {
        let transport = ScriptedTransport::new()
            .respond_json(200, tag_page(&["A", "B"], true))
            .respond_json(200, tag_page(&["C", "D"], true))
            .respond_json(200, tag_page(&["E"], false));
        let session = Session::new(&transport, 41184, "secret");

        let tags = session.tags(&ListQuery::new()).unwrap();

        assert_eq!(titles(&tags), vec!["A", "B", "C", "D", "E"]);
        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        let pages: Vec<_> = requests
            .iter()
            .map(|r| r.query_value("page").unwrap().to_string())
            .collect();
        assert_eq!(pages, vec!["1", "2", "3"]);
        assert!(requests.iter().all(|r| r.path == "/tags"));
        assert!(requests.iter().all(|r| r.query_value("token") == Some("secret")));
    }

    #[test]
    fn failure_keeps_earlier_pages() {
        let transport = ScriptedTransport::new()
            .respond_json(200, tag_page(&["A", "B"], true))
            .respond(500, "internal error");
        let session = Session::new(&transport, 41184, "secret");

        let partial = session.tags(&ListQuery::new()).unwrap_err();

        assert_eq!(titles(&partial.items), vec!["A", "B"]);
        assert_eq!(partial.error.status(), Some(500));
        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn transport_failure_on_first_page_returns_empty_partial() {
        let transport = ScriptedTransport::new().fail("connection refused");
        let session = Session::new(&transport, 41184, "secret");

        let partial = session.tags(&ListQuery::new()).unwrap_err();

        assert!(partial.items.is_empty());
        assert!(matches!(partial.error, ApiError::Transport(_)));
    }

    #[test]
    fn malformed_page_is_a_decode_error() {
        let transport = ScriptedTransport::new().respond(200, "not json");
        let session = Session::new(&transport, 41184, "secret");

        let partial = session.tags(&ListQuery::new()).unwrap_err();

        assert!(matches!(partial.error, ApiError::Decode { .. }));
    }

    #[test]
    fn order_direction_sent_upper_case() {
        let transport = ScriptedTransport::new().respond_json(200, tag_page(&[], false));
        let session = Session::new(&transport, 41184, "secret");
        let query = ListQuery::new()
            .fields("id,title")
            .order(SortOrder::new(Some("title".into()), Some("desc".into())));

        session.tags(&query).unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.query_value("order_dir"), Some("DESC"));
        assert_eq!(request.query_value("order_by"), Some("title"));
        assert_eq!(request.query_value("fields"), Some("id,title"));
    }

    #[test]
    fn missing_has_more_ends_walk() {
        let transport = ScriptedTransport::new().respond_json(200, json!({ "items": [] }));
        let session = Session::new(&transport, 41184, "secret");

        let tags = session.tags(&ListQuery::new()).unwrap();

        assert!(tags.is_empty());
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn pages_are_fetched_lazily() {
        let transport = ScriptedTransport::new()
            .respond_json(200, tag_page(&["A"], true))
            .respond_json(200, tag_page(&["B"], true));
        let session = Session::new(&transport, 41184, "secret");

        let mut pages = session.pages::<Tag>("/tags", &ListQuery::new());
        assert_eq!(transport.requests().len(), 0);

        let first = pages.next().unwrap().unwrap();
        assert_eq!(titles(&first.items), vec!["A"]);
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(pages.next_page(), Some(2));
    }

    #[test]
    fn cancellation_stops_between_pages() {
        let cancel = CancelToken::new();
        let transport = ScriptedTransport::new()
            .respond_json(200, tag_page(&["A"], true))
            .respond_json(200, tag_page(&["B"], false));
        let session = Session::new(&transport, 41184, "secret").with_cancel(cancel.clone());

        let mut pages = session.pages::<Tag>("/tags", &ListQuery::new());
        let first = pages.next().unwrap().unwrap();
        cancel.cancel();
        let partial = collect_all(std::iter::once(Ok(first)).chain(pages)).unwrap_err();

        assert_eq!(titles(&partial.items), vec!["A"]);
        assert!(matches!(partial.error, ApiError::Cancelled));
        assert_eq!(transport.requests().len(), 1);
    }
}
