use std::fmt;

use http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::{LookupSpan, Scope};
use uuid::Uuid;

/// Span field carrying the request's correlation ID.
pub const CORRELATION_ID_FIELD: &str = "correlation_id";
/// Value emitted for records that are not inside a request.
pub const DEFAULT_CORRELATION_ID: &str = "-";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrelationId(pub String);

/// Returns a fresh UUIDv4 in simple (32 hex characters) form.
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Keeps at most `length` characters of `id`, and at least one.
pub fn shorten_correlation_id(id: &str, length: usize) -> String {
    id.chars().take(length.max(1)).collect()
}

/// Generates `X-Request-ID` values for requests that arrive without one.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeCorrelationId;

impl MakeRequestId for MakeCorrelationId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&generate_correlation_id())
            .ok()
            .map(RequestId::new)
    }
}

/// Extracts the correlation ID assigned to a request, or the default value.
pub fn correlation_id_of<B>(req: &Request<B>) -> String {
    req.extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or(DEFAULT_CORRELATION_ID)
        .to_string()
}

/// Stores the `correlation_id` field of new spans in the span extensions so
/// formatters can stamp it onto every record emitted inside the span.
///
/// The stored value is cut to `length` characters; the header itself is left
/// untouched.
#[derive(Clone, Copy, Debug)]
pub struct CorrelationIdLayer {
    length: usize,
}

impl CorrelationIdLayer {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl<S> Layer<S> for CorrelationIdLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = CorrelationIdVisitor(None);
        attrs.record(&mut visitor);
        self.store(visitor, id, &ctx);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let mut visitor = CorrelationIdVisitor(None);
        values.record(&mut visitor);
        self.store(visitor, id, &ctx);
    }
}

impl CorrelationIdLayer {
    fn store<S>(&self, visitor: CorrelationIdVisitor, id: &Id, ctx: &Context<'_, S>)
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let (Some(value), Some(span)) = (visitor.0, ctx.span(id)) else {
            return;
        };
        let value = shorten_correlation_id(&value, self.length);
        span.extensions_mut().replace(CorrelationId(value));
    }
}

struct CorrelationIdVisitor(Option<String>);

impl Visit for CorrelationIdVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == CORRELATION_ID_FIELD {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == CORRELATION_ID_FIELD {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

/// Walks from the innermost span outwards and returns the first correlation ID.
pub fn find_correlation_id<'a, R>(scope: Option<Scope<'a, R>>) -> String
where
    R: LookupSpan<'a>,
{
    for span in scope.into_iter().flatten() {
        let extensions = span.extensions();
        if let Some(id) = extensions.get::<CorrelationId>() {
            return id.0.clone();
        }
    }
    DEFAULT_CORRELATION_ID.to_string()
}
