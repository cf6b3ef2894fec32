//! Folds operation descriptors into one [`AsyncApiDocument`].
//!
//! The assembler owns the document while it is being built and is the only
//! place that writes into it. Every problem it finds is reported to the
//! caller's [`DiagnosticSink`]; nothing here returns an error, so one bad
//! operation never prevents the rest of the document from being assembled.

use crate::converter::{ConverterOptions, SchemaConverter, component_name};
use crate::naming::{default_message_name, payload_schema_name};
use crate::walker::OperationDescriptor;
use asyncbridge_bindings::{
    BindingError, BindingFactory, BindingLevel, Protocol, suggest_protocol,
};
use asyncbridge_core::ast::{ModelId, Program, Type};
use asyncbridge_core::document::{
    self, AsyncApiDocument, Bindings, Channel, ChannelParameter, Info, Message, Reference, Server,
};
use asyncbridge_core::state::{BindingConfig, SecurityAnnotation, ServerAnnotation};
use asyncbridge_core::{
    Diagnostic, DiagnosticCode, DiagnosticSink, EmitterOptions, SchemaNode, template_variables,
};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Assembly switches taken from [`EmitterOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerOptions {
    pub inline_models: bool,
    pub strict: bool,
    pub infer_kafka_bindings: bool,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self::from(&EmitterOptions::default())
    }
}

impl From<&EmitterOptions> for AssemblerOptions {
    fn from(options: &EmitterOptions) -> Self {
        Self {
            inline_models: options.inline_models,
            strict: options.strict,
            infer_kafka_bindings: options.infer_kafka_bindings,
        }
    }
}

/// Where a `components.schemas` entry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SchemaOwner {
    Model(ModelId),
    /// Anonymous payload of the named operation.
    Payload(String),
}

/// Incrementally builds a document from servers, security schemes and
/// operations.
pub struct DocumentAssembler<'a> {
    program: &'a Program,
    factory: &'a BindingFactory,
    options: AssemblerOptions,
    document: AsyncApiDocument,
    /// Component name → what it was registered from.
    schema_owners: BTreeMap<String, SchemaOwner>,
    /// Message name → operation that declared it.
    message_owners: BTreeMap<String, String>,
    /// Channel key → operation that declared it.
    channel_owners: BTreeMap<String, String>,
    /// Channel address → channel key.
    addresses: BTreeMap<String, String>,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(
        program: &'a Program,
        factory: &'a BindingFactory,
        info: Info,
        options: AssemblerOptions,
    ) -> Self {
        Self {
            program,
            factory,
            options,
            document: AsyncApiDocument::new(info),
            schema_owners: BTreeMap::new(),
            message_owners: BTreeMap::new(),
            channel_owners: BTreeMap::new(),
            addresses: BTreeMap::new(),
        }
    }

    /// The document built so far.
    pub fn document(&self) -> &AsyncApiDocument {
        &self.document
    }

    pub fn finish(self) -> AsyncApiDocument {
        self.document
    }

    /// Register a model under `components.schemas` and return its key.
    ///
    /// Registering the same model again is a no-op. So is registering a
    /// structurally equal model under a name that is already taken; a
    /// different model with that name is reported as a collision and the
    /// first registration is kept. A model named like an operation payload
    /// is a collision as well. Models referenced from the converted schema
    /// are registered too.
    pub fn register_model(&mut self, id: ModelId, sink: &mut dyn DiagnosticSink) -> Option<String> {
        let program = self.program;
        let model = program.model(id)?;
        let name = component_name(model, id);

        let collides = match self.schema_owners.get(&name) {
            Some(SchemaOwner::Model(owner)) => {
                Some(*owner != id && program.model(*owner) != Some(model))
            }
            Some(SchemaOwner::Payload(_)) => Some(true),
            None if self.document.components.schemas.contains_key(&name) => Some(true),
            None => None,
        };
        if let Some(collides) = collides {
            if collides {
                sink.report(
                    Diagnostic::new(DiagnosticCode::SchemaNameCollision, &[("name", name.as_str())])
                        .at(model.qualified_name().unwrap_or_else(|| name.clone())),
                );
            }
            return Some(name);
        }

        // Claimed before conversion so cycles through this model terminate.
        self.schema_owners.insert(name.clone(), SchemaOwner::Model(id));
        let mut converter = SchemaConverter::new(program, self.converter_options());
        let schema = converter.convert_model(id);
        self.finish_conversion(&converter, sink);
        debug!(schema = %name, "registered model");
        self.document.components.schemas.insert(name.clone(), schema);

        for referenced in converter.referenced().iter().copied().collect::<Vec<_>>() {
            self.register_model(referenced, sink);
        }
        Some(name)
    }

    /// Register the payload schema of an operation and return its key.
    ///
    /// Named models are registered under their own name; any other type is
    /// converted and registered as `<Operation>Payload`.
    pub fn register_payload(
        &mut self,
        operation: &str,
        ty: &Type,
        sink: &mut dyn DiagnosticSink,
    ) -> String {
        if let Type::Model { id } = ty
            && self.program.model(*id).is_some_and(|m| m.name.is_some())
            && let Some(name) = self.register_model(*id, sink)
        {
            return name;
        }

        let name = payload_schema_name(operation);
        let mut converter = SchemaConverter::new(self.program, self.converter_options());
        let schema = converter.convert(ty);
        self.finish_conversion(&converter, sink);

        match self.document.components.schemas.get(&name) {
            Some(existing) if *existing != schema => sink.report(
                Diagnostic::new(DiagnosticCode::SchemaNameCollision, &[("name", name.as_str())])
                    .at(operation),
            ),
            Some(_) => {}
            None => {
                self.schema_owners
                    .insert(name.clone(), SchemaOwner::Payload(operation.to_string()));
                self.document.components.schemas.insert(name.clone(), schema);
            }
        }

        for referenced in converter.referenced().iter().copied().collect::<Vec<_>>() {
            self.register_model(referenced, sink);
        }
        name
    }

    /// Add a named server; `security` schemes are registered and referenced.
    pub fn add_server(
        &mut self,
        server: &ServerAnnotation,
        security: &[&SecurityAnnotation],
        sink: &mut dyn DiagnosticSink,
    ) {
        if self.document.servers.contains_key(&server.name) {
            sink.report(
                Diagnostic::new(
                    DiagnosticCode::DuplicateServerName,
                    &[("server", server.name.as_str())],
                )
                .at(&server.name),
            );
            return;
        }

        let Some(protocol) = Protocol::from_tag(&server.protocol) else {
            sink.report(
                Diagnostic::new(
                    DiagnosticCode::InvalidProtocolType,
                    &[("protocol", server.protocol.as_str())],
                )
                .at(&server.name),
            );
            return;
        };

        let bindings = server.bindings.as_ref().and_then(|config| {
            self.binding_map(protocol, BindingLevel::Server, config, &server.name, sink)
        });

        let security: Vec<Reference> = security
            .iter()
            .filter(|annotation| self.add_security_scheme(annotation, sink))
            .map(|annotation| Reference::security_scheme(&annotation.name))
            .collect();

        debug!(server = %server.name, %protocol, "added server");
        self.document.servers.insert(
            server.name.clone(),
            Server {
                host: server.host.clone(),
                protocol: server.protocol.trim().to_ascii_lowercase(),
                pathname: server.pathname.clone(),
                description: server.description.clone(),
                security,
                bindings,
            },
        );
    }

    /// Register a security scheme; returns whether it can be referenced.
    pub fn add_security_scheme(
        &mut self,
        annotation: &SecurityAnnotation,
        sink: &mut dyn DiagnosticSink,
    ) -> bool {
        let problems = annotation.scheme.validate();
        if !problems.is_empty() {
            let details = problems.join("; ");
            sink.report(
                Diagnostic::new(
                    DiagnosticCode::InvalidSecurityScheme,
                    &[
                        ("scheme", annotation.name.as_str()),
                        ("details", details.as_str()),
                    ],
                )
                .at(&annotation.name),
            );
            return false;
        }

        let schemes = &mut self.document.components.security_schemes;
        match schemes.get(&annotation.name) {
            Some(existing) if *existing == annotation.scheme => true,
            Some(_) => {
                sink.report(
                    Diagnostic::new(
                        DiagnosticCode::DuplicateSecurityScheme,
                        &[("scheme", annotation.name.as_str())],
                    )
                    .at(&annotation.name),
                );
                false
            }
            None => {
                schemes.insert(annotation.name.clone(), annotation.scheme.clone());
                true
            }
        }
    }

    /// Add one operation with its channel, message and payload schema.
    pub fn add_operation(
        &mut self,
        descriptor: &OperationDescriptor<'_>,
        sink: &mut dyn DiagnosticSink,
    ) {
        let target = descriptor.qualified_name.as_str();
        let op_name = descriptor.name;
        let key = descriptor.channel_key.as_str();

        if self.document.operations.contains_key(op_name) {
            sink.report(
                Diagnostic::new(DiagnosticCode::DuplicateOperationId, &[("operation", op_name)])
                    .at(target),
            );
            return;
        }
        if let Some(existing) = self.channel_owners.get(key) {
            sink.report(
                Diagnostic::new(
                    DiagnosticCode::DuplicateChannelId,
                    &[("channel", key), ("existing", existing.as_str())],
                )
                .at(target),
            );
            return;
        }
        if let Some(existing) = self.addresses.get(&descriptor.address) {
            sink.report(
                Diagnostic::new(
                    DiagnosticCode::DuplicateChannelAddress,
                    &[
                        ("address", descriptor.address.as_str()),
                        ("existing", existing.as_str()),
                    ],
                )
                .at(target),
            );
            return;
        }

        let mut channel = Channel::new(descriptor.address.clone());
        channel.title = descriptor.channel_title.map(str::to_string);
        channel.description = descriptor.channel_description.map(str::to_string);
        channel.parameters = self.channel_parameters(descriptor, sink);

        let mut operation = document::Operation {
            action: descriptor.action,
            channel: Reference::channel(key),
            title: None,
            summary: None,
            description: descriptor.description.map(str::to_string),
            messages: Vec::new(),
            security: Vec::new(),
            bindings: None,
        };

        let mut message = match descriptor.return_type {
            Some(ty) => Some(self.build_message(descriptor, ty, sink)),
            None => {
                if descriptor.message.is_some() {
                    sink.report(
                        Diagnostic::new(
                            DiagnosticCode::MissingMessageSchema,
                            &[("operation", op_name)],
                        )
                        .at(target),
                    );
                }
                None
            }
        };

        self.attach_protocol_bindings(descriptor, &mut channel, &mut operation, message.as_mut(), sink);

        for annotation in &descriptor.security {
            if self.add_security_scheme(annotation, sink) {
                operation
                    .security
                    .push(Reference::security_scheme(&annotation.name));
            }
        }

        if let Some(message) = message
            && self.claim_message(&message, op_name, target, sink)
        {
            let name = message.name.clone();
            channel
                .messages
                .insert(name.clone(), Reference::message(&name));
            operation.messages.push(Reference::channel_message(key, &name));
            self.document.components.messages.insert(name, message);
        }

        debug!(operation = op_name, channel = key, "added operation");
        self.channel_owners.insert(key.to_string(), op_name.to_string());
        self.addresses
            .insert(descriptor.address.clone(), key.to_string());
        self.document.channels.insert(key.to_string(), channel);
        self.document
            .operations
            .insert(op_name.to_string(), operation);
    }

    /// Whether `message` may be stored under its name. An identical message
    /// already stored is fine; a different one is a collision and the first
    /// is kept.
    fn claim_message(
        &mut self,
        message: &Message,
        operation: &str,
        target: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> bool {
        let Some(existing) = self.message_owners.get(&message.name) else {
            self.message_owners
                .insert(message.name.clone(), operation.to_string());
            return true;
        };
        if self.document.components.messages.get(&message.name) == Some(message) {
            return true;
        }
        sink.report(
            Diagnostic::new(
                DiagnosticCode::DuplicateMessageName,
                &[("name", message.name.as_str()), ("existing", existing.as_str())],
            )
            .at(target),
        );
        false
    }

    fn build_message(
        &mut self,
        descriptor: &OperationDescriptor<'_>,
        payload: &Type,
        sink: &mut dyn DiagnosticSink,
    ) -> Message {
        let schema = self.register_payload(descriptor.name, payload, sink);
        let annotation = descriptor.message.cloned().unwrap_or_default();
        Message {
            name: annotation
                .name
                .unwrap_or_else(|| default_message_name(descriptor.name)),
            title: annotation.title,
            summary: annotation.summary,
            description: annotation
                .description
                .or_else(|| descriptor.description.map(str::to_string)),
            content_type: annotation.content_type,
            payload: Reference::schema(&schema),
            bindings: None,
        }
    }

    fn channel_parameters(
        &self,
        descriptor: &OperationDescriptor<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> BTreeMap<String, ChannelParameter> {
        let mut parameters = BTreeMap::new();
        let Ok(variables) = template_variables(&descriptor.address) else {
            return parameters;
        };

        for variable in variables {
            match descriptor.parameter(variable) {
                Some(parameter) => {
                    parameters.insert(
                        variable.to_string(),
                        ChannelParameter {
                            description: parameter.description.map(str::to_string),
                        },
                    );
                }
                None => sink.report(
                    Diagnostic::new(
                        DiagnosticCode::ChannelParameterMismatch,
                        &[
                            ("address", descriptor.address.as_str()),
                            ("parameter", variable),
                            ("operation", descriptor.name),
                        ],
                    )
                    .at(descriptor.qualified_name.as_str()),
                ),
            }
        }
        parameters
    }

    fn attach_protocol_bindings(
        &mut self,
        descriptor: &OperationDescriptor<'_>,
        channel: &mut Channel,
        operation: &mut document::Operation,
        message: Option<&mut Message>,
        sink: &mut dyn DiagnosticSink,
    ) {
        let target = descriptor.qualified_name.as_str();

        let Some(annotation) = descriptor.protocol else {
            if self.options.infer_kafka_bindings
                && suggest_protocol(&descriptor.address) == Some(Protocol::Kafka)
            {
                let mut config = BindingConfig::new();
                config.insert("topic".to_string(), Value::String(descriptor.address.clone()));
                debug!(channel = %descriptor.channel_key, "inferred kafka channel binding");
                channel.bindings = self
                    .build_inferred_binding(Protocol::Kafka, BindingLevel::Channel, &config, target, sink)
                    .map(|(key, binding)| Bindings::from([(key.to_string(), binding)]));
            }
            return;
        };

        let Some(protocol) = Protocol::from_tag(&annotation.protocol) else {
            sink.report(
                Diagnostic::new(
                    DiagnosticCode::InvalidProtocolType,
                    &[("protocol", annotation.protocol.as_str())],
                )
                .at(target),
            );
            return;
        };

        if let Some(config) = &annotation.channel {
            channel.bindings = self.binding_map(protocol, BindingLevel::Channel, config, target, sink);
        }
        if let Some(config) = &annotation.operation {
            operation.bindings =
                self.binding_map(protocol, BindingLevel::Operation, config, target, sink);
        }
        if let Some(config) = &annotation.message {
            let bindings = self.binding_map(protocol, BindingLevel::Message, config, target, sink);
            if let Some(message) = message {
                message.bindings = bindings;
            }
        }
        if let Some(config) = &annotation.server {
            self.attach_server_binding(protocol, config, target, sink);
        }
    }

    /// Server-level bindings go to every server of the same protocol that
    /// does not carry one yet.
    fn attach_server_binding(
        &mut self,
        protocol: Protocol,
        config: &BindingConfig,
        target: &str,
        sink: &mut dyn DiagnosticSink,
    ) {
        let Some((key, binding)) =
            self.build_binding(protocol, BindingLevel::Server, config, target, sink)
        else {
            return;
        };
        for server in self.document.servers.values_mut() {
            if Protocol::from_tag(&server.protocol) != Some(protocol) {
                continue;
            }
            server
                .bindings
                .get_or_insert_with(Bindings::new)
                .entry(key.to_string())
                .or_insert_with(|| binding.clone());
        }
    }

    fn binding_map(
        &self,
        protocol: Protocol,
        level: BindingLevel,
        config: &BindingConfig,
        target: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<Bindings> {
        self.build_binding(protocol, level, config, target, sink)
            .map(|(key, binding)| Bindings::from([(key.to_string(), binding)]))
    }

    /// Build a binding nobody declared. One that fails validation is
    /// dropped with a warning instead of an error.
    fn build_inferred_binding(
        &self,
        protocol: Protocol,
        level: BindingLevel,
        config: &BindingConfig,
        target: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<(&'static str, Value)> {
        let diagnostic = |details: &str| {
            binding_diagnostic(DiagnosticCode::BindingWarning, protocol, level, target, details)
        };

        match self.factory.build_validated(protocol, level, config) {
            Ok(validated) => {
                for warning in &validated.warnings {
                    sink.report(diagnostic(warning));
                }
                Some((validated.key, Value::Object(validated.binding)))
            }
            Err(err) => {
                debug!(%protocol, %level, operation = target, error = %err, "inferred binding dropped");
                sink.report(diagnostic(&format!("inferred binding dropped: {err}")));
                None
            }
        }
    }

    /// Validate and build one binding. Invalid bindings are reported and
    /// not attached; warnings are reported and do not block attachment.
    fn build_binding(
        &self,
        protocol: Protocol,
        level: BindingLevel,
        config: &BindingConfig,
        target: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<(&'static str, Value)> {
        let diagnostic = |code: DiagnosticCode, details: &str| {
            binding_diagnostic(code, protocol, level, target, details)
        };

        match self.factory.build_validated(protocol, level, config) {
            Ok(validated) => {
                for warning in &validated.warnings {
                    sink.report(diagnostic(DiagnosticCode::BindingWarning, warning));
                }
                Some((validated.key, Value::Object(validated.binding)))
            }
            Err(BindingError::Invalid { errors, .. }) => {
                let details = errors.join("; ");
                warn!(%protocol, %level, operation = target, %details, "binding rejected");
                sink.report(diagnostic(DiagnosticCode::InvalidBinding, &details));
                None
            }
            Err(err) => {
                let details = format!("{err}; binding skipped");
                sink.report(diagnostic(DiagnosticCode::BindingWarning, &details));
                None
            }
        }
    }

    fn converter_options(&self) -> ConverterOptions {
        ConverterOptions {
            inline_models: self.options.inline_models,
        }
    }

    fn finish_conversion(&self, converter: &SchemaConverter<'_>, sink: &mut dyn DiagnosticSink) {
        if !self.options.strict {
            return;
        }
        for kind in converter.unsupported() {
            sink.report(Diagnostic::new(DiagnosticCode::UnsupportedType, &[("kind", *kind)]));
        }
    }
}

fn binding_diagnostic(
    code: DiagnosticCode,
    protocol: Protocol,
    level: BindingLevel,
    target: &str,
    details: &str,
) -> Diagnostic {
    Diagnostic::new(
        code,
        &[
            ("protocol", protocol.as_str()),
            ("level", level.as_str()),
            ("target", target),
            ("details", details),
        ],
    )
    .at(target)
}

/// Schemas referenced from `schema` that are not registered in `document`.
pub fn dangling_references<'s>(
    document: &AsyncApiDocument,
    schema: &'s SchemaNode,
) -> Vec<&'s str> {
    let mut dangling = Vec::new();
    schema.walk(&mut |node| {
        if let Some(name) = node.referenced_component()
            && !document.components.schemas.contains_key(name)
        {
            dangling.push(name);
        }
    });
    dangling
}
