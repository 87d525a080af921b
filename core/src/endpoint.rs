//! Declarative endpoint descriptors and the single builder that turns them
//! into `HttpRequest` values.
//!
//! # Design
//! Every catalog function returns an `Endpoint` that fixes the verb, the
//! path template, the query parameters and the body fields. Whether fields
//! travel as a multipart form or a JSON object is declared with
//! `BodyKind` per endpoint; it cannot be inferred from the data alone.
//! Binary fields always force a multipart body.

use serde_json::Value;

use crate::encoding::{encode_component, serialize_query, QueryValue};
use crate::http::{Blob, FormPart, HttpMethod, HttpRequest, RequestBody};

/// How body fields are encoded when no binary field is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `multipart/form-data`, one part per scalar and per list element.
    Multipart,
    /// A JSON object sent as-is.
    PlainParams,
}

/// A value interpolated into a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathParam {
    /// Numeric or opaque identifier, inserted verbatim.
    Id(String),
    /// User-controlled string, percent-encoded before insertion.
    Segment(String),
}

impl PathParam {
    fn render(&self) -> String {
        match self {
            PathParam::Id(id) => id.clone(),
            PathParam::Segment(s) => encode_component(s),
        }
    }
}

/// Shape of a body field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    List(Vec<Value>),
    Blob(Blob),
}

/// Where the request goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// A path on the session's server; `{}` placeholders are filled from
    /// `params` in order.
    Server {
        template: &'static str,
        params: Vec<PathParam>,
    },
    /// A fully qualified URL handed out by the server (upload and download
    /// links). Sent without the session's auth headers.
    Absolute(String),
}

/// A logical API call.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub location: Location,
    pub query: Vec<(String, QueryValue)>,
    pub body_kind: BodyKind,
    pub fields: Vec<(String, FieldValue)>,
    pub headers: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(method: HttpMethod, template: &'static str) -> Self {
        Self {
            method,
            location: Location::Server {
                template,
                params: Vec::new(),
            },
            query: Vec::new(),
            body_kind: BodyKind::Multipart,
            fields: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn get(template: &'static str) -> Self {
        Self::new(HttpMethod::Get, template)
    }

    pub fn post(template: &'static str) -> Self {
        Self::new(HttpMethod::Post, template)
    }

    pub fn put(template: &'static str) -> Self {
        Self::new(HttpMethod::Put, template)
    }

    pub fn delete(template: &'static str) -> Self {
        Self::new(HttpMethod::Delete, template)
    }

    /// An endpoint addressed by a full URL rather than a server path.
    pub fn absolute(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            location: Location::Absolute(url.into()),
            ..Self::new(method, "")
        }
    }

    /// Appends an identifier to the path parameters (not encoded).
    pub fn id(mut self, id: impl ToString) -> Self {
        self.push_param(PathParam::Id(id.to_string()));
        self
    }

    /// Appends a user-controlled path segment (percent-encoded).
    pub fn segment(mut self, value: &str) -> Self {
        self.push_param(PathParam::Segment(value.to_string()));
        self
    }

    fn push_param(&mut self, param: PathParam) {
        if let Location::Server { params, .. } = &mut self.location {
            params.push(param);
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query
            .push((key.to_string(), QueryValue::Scalar(value.to_string())));
        self
    }

    /// Adds the parameter only when a non-blank value is supplied; see
    /// `is_blank`.
    pub fn opt_query<T: Into<Value>>(self, key: &str, value: Option<T>) -> Self {
        match value.map(Into::into) {
            Some(v) if !is_blank(&v) => self.query(key, form_text(&v)),
            _ => self,
        }
    }

    pub fn query_list<I, T>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.query.push((key.to_string(), QueryValue::List(values)));
        self
    }

    /// Sends fields as a JSON object instead of a multipart form.
    pub fn plain_params(mut self) -> Self {
        self.body_kind = BodyKind::PlainParams;
        self
    }

    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields
            .push((name.to_string(), FieldValue::Scalar(value.into())));
        self
    }

    /// Adds the field only when a non-blank value is supplied; see
    /// `is_blank`.
    pub fn opt_field<T: Into<Value>>(self, name: &str, value: Option<T>) -> Self {
        match value.map(Into::into) {
            Some(v) if !is_blank(&v) => self.field(name, v),
            _ => self,
        }
    }

    pub fn field_list<I, T>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.fields.push((name.to_string(), FieldValue::List(values)));
        self
    }

    pub fn blob(mut self, name: &str, blob: Blob) -> Self {
        self.fields.push((name.to_string(), FieldValue::Blob(blob)));
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Marks the call as an XHR, which some legacy views require.
    pub fn xhr(self) -> Self {
        self.header("X-Requested-With", "XMLHttpRequest")
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self.location, Location::Absolute(_))
    }

    /// Builds the request against `server` (no trailing slash expected).
    pub fn build(&self, server: &str) -> HttpRequest {
        let mut url = match &self.location {
            Location::Server { template, params } => {
                format!("{server}{}", interpolate(template, params))
            }
            Location::Absolute(url) => url.clone(),
        };
        let query = serialize_query(&self.query);
        if !query.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }

        let mut headers = self.headers.clone();
        let body = self.body();
        if matches!(body, Some(RequestBody::Json(_))) {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }

        HttpRequest {
            method: self.method,
            url,
            headers,
            body,
            anonymous: self.is_anonymous(),
            route: self.route(),
        }
    }

    fn route(&self) -> String {
        match &self.location {
            Location::Server { template, .. } => template.to_string(),
            Location::Absolute(url) => url::Url::parse(url)
                .map(|u| u.origin().ascii_serialization())
                .unwrap_or_else(|_| "<invalid url>".to_string()),
        }
    }

    fn body(&self) -> Option<RequestBody> {
        if self.fields.is_empty() {
            return None;
        }
        let has_blob = self
            .fields
            .iter()
            .any(|(_, v)| matches!(v, FieldValue::Blob(_)));
        if has_blob || self.body_kind == BodyKind::Multipart {
            return Some(RequestBody::Multipart(self.form_parts()));
        }

        let mut object = serde_json::Map::new();
        for (name, value) in &self.fields {
            let value = match value {
                FieldValue::Scalar(v) => v.clone(),
                FieldValue::List(items) => Value::Array(items.clone()),
                FieldValue::Blob(_) => continue,
            };
            object.insert(name.clone(), value);
        }
        Some(RequestBody::Json(Value::Object(object)))
    }

    fn form_parts(&self) -> Vec<FormPart> {
        let mut parts = Vec::new();
        for (name, value) in &self.fields {
            match value {
                FieldValue::Scalar(v) => parts.push(FormPart::Text {
                    name: name.clone(),
                    value: form_text(v),
                }),
                FieldValue::List(items) => {
                    parts.extend(items.iter().map(|v| FormPart::Text {
                        name: name.clone(),
                        value: form_text(v),
                    }));
                }
                FieldValue::Blob(blob) => parts.push(FormPart::File {
                    name: name.clone(),
                    blob: blob.clone(),
                }),
            }
        }
        parts
    }
}

/// Fills `{}` placeholders in order. Extra placeholders are left as-is and
/// extra params are ignored.
fn interpolate(template: &str, params: &[PathParam]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut pieces = template.split("{}");
    let mut params = params.iter();
    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    for piece in pieces {
        match params.next() {
            Some(param) => out.push_str(&param.render()),
            None => out.push_str("{}"),
        }
        out.push_str(piece);
    }
    out
}

/// Values an optional parameter treats as not supplied: null, `false`, zero
/// and the empty string. The server reads an empty `password` or a zero
/// `expire_days` differently from an absent one.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Renders a scalar the way a browser form stringifies it.
fn form_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
