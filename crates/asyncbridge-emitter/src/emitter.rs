//! Emission orchestration: walk, assemble, lint, write.

use crate::assembler::{AssemblerOptions, DocumentAssembler};
use crate::codec::{CodecError, Provenance, codec_for};
use crate::lint::DocumentationLint;
use crate::path::{PathContext, resolve_output_path_or_fallback};
use crate::walker::{describe_operation, discover_namespaces, discover_operations};
use asyncbridge_bindings::BindingFactory;
use asyncbridge_core::ast::Program;
use asyncbridge_core::document::Info;
use asyncbridge_core::{
    AnnotationState, AsyncApiDocument, Diagnostic, DiagnosticSink, Diagnostics, EmitterOptions,
    ExtensionConfig, ExtensionKind, ExtensionRegistry,
};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end an emission
#[derive(Debug, Error)]
pub enum EmitError {
    #[error(
        "emission rejected: {} error(s) reported",
        .diagnostics.iter().filter(|d| d.is_error()).count()
    )]
    Rejected { diagnostics: Vec<Diagnostic> },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A successfully assembled document
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub document: AsyncApiDocument,

    /// Warnings reported while emitting, plus errors for bindings that were
    /// dropped
    pub diagnostics: Vec<Diagnostic>,

    pub operation_count: usize,
    pub source_files: Vec<String>,
}

impl Emission {
    pub fn provenance(&self) -> Provenance {
        Provenance::new(self.source_files.clone(), self.operation_count)
    }
}

/// Turns a program plus its annotation state into an AsyncAPI document
pub struct Emitter {
    options: EmitterOptions,
    factory: BindingFactory,
}

impl Emitter {
    /// Create an emitter with the default protocol bindings
    pub fn new(options: EmitterOptions) -> Self {
        Self::with_factory(options, BindingFactory::with_defaults())
    }

    pub fn with_factory(options: EmitterOptions, factory: BindingFactory) -> Self {
        Self { options, factory }
    }

    pub fn options(&self) -> &EmitterOptions {
        &self.options
    }

    /// Emit a document, running the built-in lint when enabled
    pub fn emit(&self, program: &Program, state: &AnnotationState) -> Result<Emission, EmitError> {
        let mut registry = ExtensionRegistry::new();
        if self.options.lint_documentation
            && let Err(err) = registry.register(Box::new(DocumentationLint), ExtensionConfig::new())
        {
            warn!(error = %err, "could not register documentation lint");
        }

        let result = self.emit_with_extensions(program, state, &mut registry);

        let mut shutdown = Diagnostics::new();
        registry.shutdown_all(&mut shutdown);
        result
    }

    /// Emit a document and run every active `Lint` extension over it
    ///
    /// Any error-severity diagnostic, including extension failures, rejects
    /// the emission. Invalid bindings are the exception: the binding is left
    /// out and its error is returned with the emission.
    pub fn emit_with_extensions(
        &self,
        program: &Program,
        state: &AnnotationState,
        registry: &mut ExtensionRegistry,
    ) -> Result<Emission, EmitError> {
        let mut sink = Diagnostics::new();
        let mut assembler = DocumentAssembler::new(
            program,
            &self.factory,
            self.info(program),
            AssemblerOptions::from(&self.options),
        );

        for (qualified_name, _) in discover_namespaces(program) {
            let security = state.security(&qualified_name);
            for server in state.servers(&qualified_name) {
                assembler.add_server(server, &security, &mut sink);
            }
        }

        let operations = discover_operations(program);
        for discovered in &operations {
            let descriptor = describe_operation(discovered, state, &mut sink);
            assembler.add_operation(&descriptor, &mut sink);
        }
        let document = assembler.finish();

        registry.start_all(&mut sink);
        let linted = registry.execute_all(ExtensionKind::Lint, &document, &mut sink);
        debug!(extensions = linted, "lint extensions executed");

        info!(
            operations = operations.len(),
            channels = document.channels.len(),
            schemas = document.components.schemas.len(),
            diagnostics = sink.len(),
            "emission finished"
        );

        if sink.has_blocking() {
            return Err(EmitError::Rejected {
                diagnostics: sink.into_vec(),
            });
        }

        Ok(Emission {
            document,
            diagnostics: sink.into_vec(),
            operation_count: operations.len(),
            source_files: program.source_files.clone(),
        })
    }

    /// Render an emission in the configured format and write it once
    ///
    /// Parent directories are created first. Returns the written path.
    pub fn write(&self, emission: &Emission, context: &PathContext) -> Result<PathBuf, EmitError> {
        let file_type = self.options.file_type;
        let path = resolve_output_path_or_fallback(&self.options.output_file, context, file_type);
        let text = codec_for(file_type).render(&emission.document, &emission.provenance())?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| EmitError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, text).map_err(|source| EmitError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), format = %file_type, "wrote document");
        Ok(path)
    }

    /// Write an emission, then run every active `PostEmit` extension
    pub fn write_with_extensions(
        &self,
        emission: &Emission,
        context: &PathContext,
        registry: &mut ExtensionRegistry,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<PathBuf, EmitError> {
        let path = self.write(emission, context)?;
        registry.start_all(sink);
        registry.execute_all(ExtensionKind::PostEmit, &emission.document, sink);
        Ok(path)
    }

    fn info(&self, program: &Program) -> Info {
        let mut info = Info::new(&self.options.title, &self.options.version);
        info.description = self
            .options
            .description
            .clone()
            .or_else(|| program.root.doc.clone());
        info
    }
}
