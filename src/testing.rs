//! A scripted [`Provider`] for exercising code built on the adapter without
//! a browser.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::{ProviderError, ProviderErrorCode},
    provider::{Method, Provider, RequestArguments},
};

type Reply = Result<Value, ProviderError>;

/// Provider answering from scripted replies and recording every request.
///
/// Each method has a queue of replies. Replies are consumed in order and
/// the last one keeps being returned. Methods without a reply are rejected
/// with [`ProviderErrorCode::UnsupportedMethod`].
#[derive(Debug, Default)]
pub struct MockProvider {
    is_metamask: bool,
    replies: RefCell<HashMap<Method, VecDeque<Reply>>>,
    requests: RefCell<Vec<RequestArguments>>,
}

impl MockProvider {
    /// a provider which does not identify itself as MetaMask
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metamask() -> Self {
        Self {
            is_metamask: true,
            ..Self::default()
        }
    }

    /// queue a successful reply for `method`
    pub fn respond(self, method: Method, result: impl serde::Serialize) -> Self {
        let result = serde_json::to_value(result).unwrap_or(Value::Null);
        self.push(method, Ok(result))
    }

    /// queue a rejection for `method`
    pub fn reject(self, method: Method, code: ProviderErrorCode, message: &str) -> Self {
        self.push(method, Err(ProviderError::new(code, message)))
    }

    fn push(self, method: Method, reply: Reply) -> Self {
        self.replies
            .borrow_mut()
            .entry(method)
            .or_default()
            .push_back(reply);
        self
    }

    /// every request received so far, in order
    pub fn requests(&self) -> Vec<RequestArguments> {
        self.requests.borrow().clone()
    }

    /// the methods of every request received so far, in order
    pub fn methods(&self) -> Vec<Method> {
        self.requests.borrow().iter().map(|args| args.method).collect()
    }

    pub fn count(&self, method: Method) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|args| args.method == method)
            .count()
    }
}

#[async_trait(?Send)]
impl Provider for MockProvider {
    fn is_metamask(&self) -> bool {
        self.is_metamask
    }

    async fn request(&self, args: RequestArguments) -> Result<Value, ProviderError> {
        let method = args.method;
        self.requests.borrow_mut().push(args);

        let mut replies = self.replies.borrow_mut();
        let Some(queue) = replies.get_mut(&method) else {
            return Err(ProviderError::new(
                ProviderErrorCode::UnsupportedMethod,
                format!("The method \"{method}\" does not exist / is not available."),
            ));
        };

        if queue.len() > 1 {
            queue.pop_front().unwrap_or(Ok(Value::Null))
        } else {
            queue.front().cloned().unwrap_or(Ok(Value::Null))
        }
    }
}
