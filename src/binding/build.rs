use super::types::ParameterDescriptor;
use crate::error::BindingDeclError;
use std::collections::HashSet;

/// Body-bound parameters of one handler, declared at registration time.
///
/// This is the explicit name-to-descriptor mapping the dispatcher consults
/// for every request; parameter names are never discovered at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerBindings {
    pub handler_name: String,
    pub parameters: Vec<ParameterDescriptor>,
}

impl HandlerBindings {
    pub fn new(handler_name: impl Into<String>) -> Self {
        Self {
            handler_name: handler_name.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter descriptor. Declaration order is resolution order.
    #[must_use]
    pub fn param(mut self, descriptor: ParameterDescriptor) -> Self {
        self.parameters.push(descriptor);
        self
    }

    /// Whether `name` opts into body binding for this handler.
    pub fn supports_parameter(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| p.source_name() == name)
    }

    pub fn descriptor(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.source_name() == name)
    }

    /// Reject declarations the resolver could not serve unambiguously.
    ///
    /// Two parameters may read the same JSON key, but not share a source name.
    pub fn validate(&self) -> Result<(), BindingDeclError> {
        if self.handler_name.trim().is_empty() {
            return Err(BindingDeclError::BlankHandlerName);
        }
        let mut seen = HashSet::with_capacity(self.parameters.len());
        for p in &self.parameters {
            if p.source_name().trim().is_empty() {
                return Err(BindingDeclError::BlankParameterName {
                    handler: self.handler_name.clone(),
                });
            }
            if !seen.insert(p.source_name()) {
                return Err(BindingDeclError::DuplicateParameter {
                    handler: self.handler_name.clone(),
                    name: p.source_name().to_string(),
                });
            }
        }
        Ok(())
    }
}
