//! The endpoint session and the resource operations built on it.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::cancel::CancelToken;
use super::error::{ApiError, ApiResult, FetchResult};
use super::paginate::{Pages, collect_all};
use super::query::{ListQuery, SearchQuery};
use super::transport::{HttpTransport, Method, Request, Response, Transport};
use crate::domain::{
    Entity, EventBatch, Folder, Item, NewFolder, Note, NoteUpdate, Resource, Tag,
};

/// The record a request addresses, used to classify a 404.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Subject {
    what: &'static str,
    id: String,
}

impl Subject {
    fn new(what: &'static str, id: &str) -> Self {
        Self {
            what,
            id: id.to_string(),
        }
    }
}

/// Decodes a success body, keeping the raw dump on failure.
pub(crate) fn decode<D: DeserializeOwned>(response: Response) -> ApiResult<D> {
    serde_json::from_str(&response.body).map_err(|source| ApiError::Decode {
        dump: response.dump(),
        source,
    })
}

/// Passes success responses through and turns the rest into `Status` errors.
pub(crate) fn require_success(response: Response) -> ApiResult<Response> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: response.status,
            dump: response.dump(),
        })
    }
}

/// Characters escaped inside one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Joins `segments` into an absolute path, escaping each one so an ID
/// can never change the request target.
pub(crate) fn path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|segment| format!("/{}", utf8_percent_encode(segment, SEGMENT)))
        .collect()
}

fn encode<S: Serialize>(body: &S) -> ApiResult<serde_json::Value> {
    serde_json::to_value(body).map_err(ApiError::Encode)
}

/// A resolved port and API token, plus the transport that reaches them.
///
/// Built once after discovery and never changed: every operation borrows
/// the session immutably.
#[derive(Debug)]
pub struct Session<T: Transport = HttpTransport> {
    transport: T,
    port: u16,
    token: String,
    cancel: CancelToken,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, port: u16, token: impl Into<String>) -> Self {
        Self {
            transport,
            port,
            token: token.into(),
            cancel: CancelToken::new(),
        }
    }

    /// Attaches a cancellation token checked before every request.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// A request for `path` carrying the API token.
    pub(crate) fn request(&self, method: Method, path: &str) -> Request {
        Request::new(method, self.port, path).param("token", self.token.as_str())
    }

    /// Sends one request and classifies its status.
    pub(crate) fn execute(&self, request: Request, subject: Option<&Subject>) -> ApiResult<Response> {
        if self.cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        let response = self.transport.send(&request)?;
        if response.is_success() {
            return Ok(response);
        }

        match subject {
            Some(subject) if response.status == 404 => Err(ApiError::NotFound {
                what: subject.what,
                id: subject.id.clone(),
            }),
            _ => Err(ApiError::Status {
                status: response.status,
                dump: response.dump(),
            }),
        }
    }

    /// Lazily walks the collection at `path`.
    pub fn pages<E: DeserializeOwned>(&self, path: &str, query: &ListQuery) -> Pages<'_, T, E> {
        Pages::new(self, path.to_string(), query.params(), None)
    }

    fn pages_of<E: DeserializeOwned>(
        &self,
        path: String,
        params: Vec<(String, String)>,
        subject: Option<Subject>,
    ) -> FetchResult<E> {
        collect_all(Pages::new(self, path, params, subject))
    }

    fn get_entity<E: Entity>(&self, collection: &str, id: &str, fields: Option<&str>) -> ApiResult<E> {
        let mut request = self.request(Method::Get, &path(&[collection, id]));
        if let Some(fields) = fields.filter(|f| !f.is_empty()) {
            request = request.param("fields", fields);
        }
        let subject = Subject::new(E::KIND.label(), id);
        self.execute(request, Some(&subject)).and_then(decode)
    }

    fn delete_path(&self, target: &str, subject: Subject) -> ApiResult<()> {
        self.execute(self.request(Method::Delete, target), Some(&subject))
            .map(|_| ())
    }

    // ===========================================
    // Tags
    // ===========================================

    pub fn tag(&self, id: &str, fields: Option<&str>) -> ApiResult<Tag> {
        self.get_entity("tags", id, fields)
    }

    pub fn tags(&self, query: &ListQuery) -> FetchResult<Tag> {
        self.pages_of("/tags".to_string(), query.params(), None)
    }

    /// Creates a tag and returns the record the service stored.
    pub fn create_tag(&self, title: &str) -> ApiResult<Tag> {
        let request = self
            .request(Method::Post, "/tags")
            .json(json!({ "title": title }));
        self.execute(request, None).and_then(decode)
    }

    pub fn delete_tag(&self, id: &str) -> ApiResult<()> {
        self.delete_path(&path(&["tags", id]), Subject::new("tag", id))
    }

    /// Notes carrying the tag `tag_id`.
    pub fn notes_with_tag(&self, tag_id: &str, query: &ListQuery) -> FetchResult<Note> {
        self.pages_of(
            path(&["tags", tag_id, "notes"]),
            query.params(),
            Some(Subject::new("tag", tag_id)),
        )
    }

    pub fn add_tag_to_note(&self, tag_id: &str, note_id: &str) -> ApiResult<()> {
        let request = self
            .request(Method::Post, &path(&["tags", tag_id, "notes"]))
            .json(json!({ "id": note_id }));
        self.execute(request, Some(&Subject::new("tag", tag_id)))
            .map(|_| ())
    }

    pub fn remove_tag_from_note(&self, tag_id: &str, note_id: &str) -> ApiResult<()> {
        self.delete_path(
            &path(&["tags", tag_id, "notes", note_id]),
            Subject::new("tag", tag_id),
        )
    }

    // ===========================================
    // Notes
    // ===========================================

    pub fn note(&self, id: &str, fields: Option<&str>) -> ApiResult<Note> {
        self.get_entity("notes", id, fields)
    }

    pub fn notes(&self, query: &ListQuery) -> FetchResult<Note> {
        self.pages_of("/notes".to_string(), query.params(), None)
    }

    /// Applies `update` and returns the record the service echoed.
    pub fn update_note(&self, id: &str, update: &NoteUpdate) -> ApiResult<Note> {
        let body = encode(update)?;
        let request = self.request(Method::Put, &path(&["notes", id])).json(body);
        self.execute(request, Some(&Subject::new("note", id)))
            .and_then(decode)
    }

    /// Tags attached to the note `id`.
    pub fn note_tags(&self, id: &str, query: &ListQuery) -> FetchResult<Tag> {
        self.pages_of(
            path(&["notes", id, "tags"]),
            query.params(),
            Some(Subject::new("note", id)),
        )
    }

    pub fn note_author(&self, id: &str) -> ApiResult<String> {
        self.note(id, Some("id,title,author")).map(|note| note.author)
    }

    pub fn set_note_author(&self, id: &str, author: &str) -> ApiResult<Note> {
        self.update_note(id, &NoteUpdate::author(author))
    }

    // ===========================================
    // Folders
    // ===========================================

    pub fn folder(&self, id: &str, fields: Option<&str>) -> ApiResult<Folder> {
        self.get_entity("folders", id, fields)
    }

    pub fn folders(&self, query: &ListQuery) -> FetchResult<Folder> {
        self.pages_of("/folders".to_string(), query.params(), None)
    }

    /// Notes directly inside the folder `id`.
    pub fn folder_notes(&self, id: &str, query: &ListQuery) -> FetchResult<Note> {
        self.pages_of(
            path(&["folders", id, "notes"]),
            query.params(),
            Some(Subject::new("folder", id)),
        )
    }

    /// Creates a folder, nested under `parent_id` when given.
    pub fn create_folder(&self, title: &str, parent_id: Option<&str>) -> ApiResult<Folder> {
        let folder = NewFolder {
            title: title.to_string(),
            parent_id: parent_id.map(str::to_string),
        };
        let body = encode(&folder)?;
        let request = self.request(Method::Post, "/folders").json(body);
        self.execute(request, None).and_then(decode)
    }

    pub fn delete_folder(&self, id: &str) -> ApiResult<()> {
        self.delete_path(&path(&["folders", id]), Subject::new("folder", id))
    }

    // ===========================================
    // Resources and events
    // ===========================================

    pub fn resource(&self, id: &str, fields: Option<&str>) -> ApiResult<Resource> {
        self.get_entity("resources", id, fields)
    }

    pub fn resources(&self, query: &ListQuery) -> FetchResult<Resource> {
        self.pages_of("/resources".to_string(), query.params(), None)
    }

    /// One batch of the change feed after `cursor` (from the start when `None`).
    pub fn events(&self, cursor: Option<&str>) -> ApiResult<EventBatch> {
        let mut request = self.request(Method::Get, "/events");
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            request = request.param("cursor", cursor);
        }
        self.execute(request, None).and_then(decode)
    }

    // ===========================================
    // Search
    // ===========================================

    pub fn search(&self, query: &SearchQuery) -> FetchResult<Item> {
        self.pages_of("/search".to_string(), query.params(), None)
    }
}
