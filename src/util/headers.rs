use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use aws_sdk_s3::client::customize::CustomizableOperation;
use aws_smithy_runtime_api::{
    box_error::BoxError,
    client::{
        interceptors::{Intercept, context::BeforeDeserializationInterceptorContextRef},
        runtime_components::RuntimeComponents,
    },
};
use aws_smithy_types::config_bag::ConfigBag;

use crate::{error::Result, headers::Directive};

/// Validates every directive up front so a bad value fails before anything
/// is sent.
pub(crate) fn encode_directives<I>(directives: I) -> Result<Vec<(String, String)>>
where
    I: IntoIterator<Item = Directive>,
{
    directives
        .into_iter()
        .map(|d| {
            let (name, value) = d.header()?;
            // Directive::value only accepts visible ASCII text.
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            Ok((name.as_str().to_string(), value))
        })
        .collect()
}

/// Appends pre-validated header pairs to every attempt of the request.
pub(crate) fn append_headers<T, E, B>(
    op: CustomizableOperation<T, E, B>,
    pairs: Vec<(String, String)>,
) -> CustomizableOperation<T, E, B> {
    if pairs.is_empty() {
        return op;
    }
    op.mutate_request(move |req| {
        for (name, value) in &pairs {
            req.headers_mut().append(name.clone(), value.clone());
        }
    })
}

/// Copies the raw response headers of the last attempt.
///
/// The typed SDK outputs drop vendor headers, so calls that need them attach
/// this interceptor and read the copy after `send` returns.
#[derive(Clone, Debug, Default)]
pub(crate) struct HeaderCapture {
    slot: Arc<Mutex<Option<HashMap<String, String>>>>,
}

impl HeaderCapture {
    /// Takes the captured headers. Names are lowercase.
    pub(crate) fn take(&self) -> Option<HashMap<String, String>> {
        self.slot.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl Intercept for HeaderCapture {
    fn name(&self) -> &'static str {
        "TigrisHeaderCapture"
    }

    fn read_after_transmit(
        &self,
        context: &BeforeDeserializationInterceptorContextRef<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> std::result::Result<(), BoxError> {
        let headers = context
            .response()
            .headers()
            .iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
            .collect::<HashMap<_, _>>();

        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(headers);
        }
        Ok(())
    }
}
