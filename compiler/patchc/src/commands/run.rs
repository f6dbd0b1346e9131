//! `patchc run`: apply a script to a JSON document and print the result.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use patch_diagnostic::{PositionedError, TerminalEmitter};
use patch_eval::json::parse_json;
use patch_eval::{
    new_object, stdout_sink, EvalError, EvalResult, EvaluationContext, Execute, LangConfig,
    LibraryLocator, LibraryRequest, ObjectMap, ObjectRef, Value,
};
use patch_ir::Program;

use super::{read_error_message, read_file};
use crate::options::RunOptions;

/// Run a script and print the patched root as pretty JSON. Exits with
/// status 1 after reporting any error.
pub fn run_file(options: &RunOptions) {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter =
        TerminalEmitter::stderr(options.color, is_tty).with_trace_style(options.trace_style);

    let source = read_file(&options.script);
    let lexed = patch_lexer::lex(&source, &options.script);
    if lexed.has_errors() {
        emitter.emit_all(&lexed.errors);
        emitter.flush();
        std::process::exit(1);
    }
    let parsed = patch_parse::parse(&lexed.tokens);
    if parsed.has_errors() {
        emitter.emit_all(&parsed.errors);
        emitter.flush();
        std::process::exit(1);
    }

    let root = match options.root.as_deref().map(load_root) {
        None => new_object(ObjectMap::new()),
        Some(Ok(root)) => root,
        Some(Err(error)) => {
            emitter.emit(&*error);
            emitter.flush();
            std::process::exit(1);
        }
    };

    let config = LangConfig::new()
        .with_trace_style(options.trace_style)
        .with_max_call_depth(options.max_call_depth);
    let context = EvaluationContext::builder()
        .root(Rc::clone(&root))
        .library_locator(FileLocator::beside(Path::new(&options.script)))
        .debug_sink(stdout_sink())
        .config(config)
        .build();

    tracing::debug!(script = %options.script, "running");
    if let Err(error) = parsed.program.execute(&context) {
        emitter.emit(&error);
        emitter.flush();
        std::process::exit(1);
    }

    println!("{}", Value::Object(root).to_json_pretty());
}

/// Read the document to patch. Its top level must be an object.
fn load_root(path: &str) -> Result<ObjectRef, Box<dyn PositionedError>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => return Err(Box::new(EvalError::new(read_error_message(path, &e)))),
    };
    match parse_json(&text, path) {
        Ok(Value::Object(root)) => Ok(root),
        Ok(other) => Err(Box::new(EvalError::new(format!(
            "Root document '{path}' must be an object, found {}",
            other.type_name()
        )))),
        Err(error) => Err(Box::new(error)),
    }
}

/// Resolves `import "name"` to `name.patch` in one directory and runs it
/// with the library object as its root.
pub(crate) struct FileLocator {
    directory: PathBuf,
}

impl FileLocator {
    /// A locator for libraries next to `script`.
    pub(crate) fn beside(script: &Path) -> Self {
        let directory = script
            .parent()
            .map_or_else(PathBuf::new, Path::to_path_buf);
        FileLocator { directory }
    }
}

impl LibraryLocator for FileLocator {
    #[tracing::instrument(level = "debug", skip_all, fields(name = request.name))]
    fn load_library(&self, request: &LibraryRequest<'_>) -> EvalResult<()> {
        let path = self.directory.join(format!("{}.patch", request.name));
        let program = load_program(&path).map_err(|cause| {
            EvalError::new(format!("Cannot load library {}", request.name))
                .with_span(request.span.clone())
                .with_cause(cause)
        })?;
        let context = request.context.library_context(Rc::clone(request.library));
        program.execute(&context)
    }
}

fn load_program(path: &Path) -> EvalResult<Program> {
    let name = path.display().to_string();
    let source =
        std::fs::read_to_string(path).map_err(|e| EvalError::new(read_error_message(&name, &e)))?;
    let lexed = patch_lexer::lex(&source, &name);
    if let Some(error) = lexed.errors.first() {
        return Err(located(error));
    }
    let parsed = patch_parse::parse(&lexed.tokens);
    if let Some(error) = parsed.errors.first() {
        return Err(located(error));
    }
    Ok(parsed.program)
}

/// A lex or parse failure as an evaluation error at the same position.
fn located(error: &dyn PositionedError) -> EvalError {
    let converted = EvalError::new(error.message());
    match error.span() {
        Some(span) => converted.with_span(span.clone()),
        None => converted,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::fs;

    use patch_eval::{buffer_sink, SharedDebugSink};
    use pretty_assertions::assert_eq;

    use super::*;

    fn run_in(directory: &Path, script: &str) -> (EvalResult<()>, SharedDebugSink) {
        let sink = buffer_sink();
        let context = EvaluationContext::builder()
            .library_locator(FileLocator::beside(&directory.join("main.patch")))
            .debug_sink(sink.clone())
            .build();
        let lexed = patch_lexer::lex(script, "main.patch");
        let parsed = patch_parse::parse(&lexed.tokens);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        (parsed.program.execute(&context), sink)
    }

    #[test]
    fn test_loads_library_beside_script() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("shapes.patch"), "$.square = (x) -> x * x;").unwrap();
        fs::write(
            dir.path().join("solids.patch"),
            "import \"shapes\";\n$.cube = (x) -> shapes.square(x) * x;",
        )
        .unwrap();

        let (result, sink) = run_in(
            dir.path(),
            "import \"solids\";\ndebug.log(solids.cube(2));",
        );
        assert!(result.is_ok(), "{result:?}");
        assert_eq!(sink.get_output(), "8.0\n");
    }

    #[test]
    fn test_missing_library() {
        let dir = tempfile::tempdir().unwrap();
        let (result, _) = run_in(dir.path(), "import \"nowhere\";");
        let error = result.unwrap_err();
        assert_eq!(error.message, "Cannot load library nowhere");
        let cause = PositionedError::cause(&error).unwrap();
        assert!(
            cause.message().starts_with("cannot find file"),
            "{}",
            cause.message()
        );
    }

    #[test]
    fn test_library_syntax_error_keeps_position() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.patch"), "\n$.x = ;").unwrap();
        let (result, _) = run_in(dir.path(), "import \"broken\";");
        let error = result.unwrap_err();
        let cause = PositionedError::cause(&error).unwrap();
        assert_eq!(cause.span().unwrap().from().row(), 2);
    }

    #[test]
    fn test_load_root() {
        let dir = tempfile::tempdir().unwrap();
        let object = dir.path().join("object.json");
        fs::write(&object, r#"{"a": [1, 2], "b": {"c": null}}"#).unwrap();
        let root = load_root(object.to_str().unwrap()).ok().unwrap();
        assert_eq!(Value::Object(root).to_json(), r#"{"a":[1,2],"b":{"c":null}}"#);

        let array = dir.path().join("array.json");
        fs::write(&array, "[1]").unwrap();
        let error = load_root(array.to_str().unwrap()).err().unwrap();
        assert!(error.message().ends_with("must be an object, found array"));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{\"a\": }").unwrap();
        assert!(load_root(broken.to_str().unwrap()).is_err());
    }
}
