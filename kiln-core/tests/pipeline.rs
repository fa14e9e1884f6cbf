//! End-to-end runs through registry, binder and invoker.

use std::{sync::Arc, time::Duration};

use kiln_core::{
    ArgumentMeta, BoundValue, BoxError, Completion, Dispatcher, EntryPoint, Error, ErrorBundle,
    Generator, GeneratorRegistry, InputModel, InvocationFault, Invoker, Library, OptionMeta,
    PropertyInfo, PropertyType, Services,
};
use parking_lot::Mutex;

/// Collects what generators saw, for assertions.
#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<String>>,
}

impl Recorder {
    fn record(&self, entry: impl Into<String>) {
        self.seen.lock().push(entry.into());
    }

    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.seen.lock())
    }
}

// widget: one boolean property

#[derive(Debug, Default)]
struct WidgetModel {
    force: bool,
}

impl InputModel for WidgetModel {
    fn properties() -> Vec<PropertyInfo> {
        vec![PropertyInfo::new("Force", PropertyType::Bool)]
    }

    fn create() -> Result<Self, BoxError> {
        Ok(Self::default())
    }

    fn set(&mut self, property: &str, value: BoundValue) -> Result<(), BoxError> {
        match property {
            "Force" => self.force = value.as_flag().unwrap_or_default(),
            other => return Err(format!("unknown property '{other}'").into()),
        }
        Ok(())
    }
}

struct WidgetGenerator {
    recorder: Arc<Recorder>,
}

impl EntryPoint for WidgetGenerator {
    type Model = WidgetModel;
    type Output = Result<(), BoxError>;

    fn create(services: &Services) -> Result<Self, BoxError> {
        Ok(Self {
            recorder: services.require::<Recorder>()?,
        })
    }

    fn generate(self, model: WidgetModel) -> Self::Output {
        self.recorder.record(format!("force={}", model.force));
        Ok(())
    }
}

// page: every kind of binding

#[derive(Debug, Default)]
struct PageModel {
    name: Option<String>,
    layout: String,
    copies: i64,
    overwrite: bool,
}

impl InputModel for PageModel {
    fn properties() -> Vec<PropertyInfo> {
        vec![
            PropertyInfo::new("Name", PropertyType::String)
                .argument(ArgumentMeta::new("Page name")),
            PropertyInfo::new("Layout", PropertyType::String)
                .option(OptionMeta::new().alias("l").default_value("_Layout")),
            PropertyInfo::new("Copies", PropertyType::Int).option(OptionMeta::new()),
            PropertyInfo::new("Overwrite", PropertyType::Bool),
        ]
    }

    fn create() -> Result<Self, BoxError> {
        Ok(Self::default())
    }

    fn set(&mut self, property: &str, value: BoundValue) -> Result<(), BoxError> {
        match property {
            "Name" => self.name = value.into_string(),
            "Layout" => self.layout = value.into_string().unwrap_or_default(),
            "Copies" => {
                let text = value.into_string().unwrap_or_default();
                self.copies = if text.is_empty() {
                    1
                } else {
                    text.parse()
                        .map_err(|_| format!("'{text}' is not a valid number of copies"))?
                };
            }
            "Overwrite" => self.overwrite = value.as_flag().unwrap_or_default(),
            other => return Err(format!("unknown property '{other}'").into()),
        }
        Ok(())
    }
}

struct PageGenerator {
    recorder: Arc<Recorder>,
}

impl EntryPoint for PageGenerator {
    type Model = PageModel;
    type Output = Result<(), BoxError>;

    fn create(services: &Services) -> Result<Self, BoxError> {
        Ok(Self {
            recorder: services.require::<Recorder>()?,
        })
    }

    fn generate(self, model: PageModel) -> Self::Output {
        self.recorder.record(format!("{model:?}"));
        Ok(())
    }
}

// chain: fails through several wrapper layers

#[derive(Default)]
struct EmptyModel;

impl InputModel for EmptyModel {
    fn properties() -> Vec<PropertyInfo> {
        Vec::new()
    }

    fn create() -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn set(&mut self, _: &str, _: BoundValue) -> Result<(), BoxError> {
        Ok(())
    }
}

struct Chain;

impl EntryPoint for Chain {
    type Model = EmptyModel;
    type Output = Result<(), InvocationFault>;

    const ALIAS: Option<&'static str> = Some("chain");

    fn create(_: &Services) -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn generate(self, _: EmptyModel) -> Self::Output {
        let bundle = ErrorBundle::new(vec![
            "model 'Order' has no primary key".into(),
            "second failure".into(),
        ]);
        let inner = InvocationFault::new("controller", bundle);
        Err(InvocationFault::new("area", inner))
    }
}

impl Generator for Chain {}

// slow: asynchronous action

struct SlowGenerator;

impl EntryPoint for SlowGenerator {
    type Model = EmptyModel;
    type Output = Completion;

    fn create(_: &Services) -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn generate(self, _: EmptyModel) -> Completion {
        Completion::future(async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Err::<(), BoxError>("timed out waiting for templates".into())
        })
    }
}

// area: dispatches to another generator

struct AreaGenerator {
    dispatcher: Arc<Dispatcher>,
}

impl EntryPoint for AreaGenerator {
    type Model = EmptyModel;
    type Output = Result<(), InvocationFault>;

    fn create(services: &Services) -> Result<Self, BoxError> {
        Ok(Self {
            dispatcher: services.require::<Dispatcher>()?,
        })
    }

    fn generate(self, _: EmptyModel) -> Self::Output {
        self.dispatcher.dispatch("page", ["Index", "--copies", "many"])
    }
}

// scaffold: dispatches with an argument the target does not know

struct ScaffoldGenerator {
    dispatcher: Arc<Dispatcher>,
}

impl EntryPoint for ScaffoldGenerator {
    type Model = EmptyModel;
    type Output = Result<(), InvocationFault>;

    fn create(services: &Services) -> Result<Self, BoxError> {
        Ok(Self {
            dispatcher: services.require::<Dispatcher>()?,
        })
    }

    fn generate(self, _: EmptyModel) -> Self::Output {
        self.dispatcher.dispatch("widget", ["--nope"])
    }
}

// broken: the model cannot be created

struct BrokenModel;

impl InputModel for BrokenModel {
    fn properties() -> Vec<PropertyInfo> {
        Vec::new()
    }

    fn create() -> Result<Self, BoxError> {
        Err("model requires a project context".into())
    }

    fn set(&mut self, _: &str, _: BoundValue) -> Result<(), BoxError> {
        Ok(())
    }
}

struct BrokenGenerator;

impl EntryPoint for BrokenGenerator {
    type Model = BrokenModel;
    type Output = Result<(), BoxError>;

    fn create(_: &Services) -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn generate(self, _: BrokenModel) -> Self::Output {
        Ok(())
    }
}

fn library() -> Library {
    Library::new("samples")
        .convention::<WidgetGenerator>()
        .convention::<PageGenerator>()
        .generator::<Chain>()
        .convention::<SlowGenerator>()
        .convention::<AreaGenerator>()
        .convention::<ScaffoldGenerator>()
        .convention::<BrokenGenerator>()
}

fn setup() -> (Invoker, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let mut services = Services::new();
    services.insert_arc(Arc::clone(&recorder));

    let registry = Arc::new(GeneratorRegistry::new(vec![library()]));
    (Invoker::new(registry, services), recorder)
}

fn invocation_message(err: Error) -> String {
    match err {
        Error::Invocation { message } => message,
        other => panic!("expected an invocation error, got {other:?}"),
    }
}

#[test]
fn test_widget_flag_scenario() {
    let (invoker, recorder) = setup();

    let widget = invoker.registry().resolve("WIDGET").unwrap();
    let (_, bindings) = Invoker::generator_command(&widget).unwrap();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].template(), "--force");

    invoker.run(["widget"]).unwrap();
    invoker.run(["widget", "--force"]).unwrap();
    assert_eq!(recorder.take(), vec!["force=false", "force=true"]);
}

#[test]
fn test_duplicate_names_across_libraries() {
    let registry = GeneratorRegistry::new(vec![
        Library::new("alpha").convention::<WidgetGenerator>(),
        Library::new("beta").convention::<WidgetGenerator>(),
    ]);
    let invoker = Invoker::new(Arc::new(registry), Services::new());

    let err = invoker.run(["widget"]).unwrap_err();
    assert!(matches!(err, Error::AmbiguousName { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_nested_faults_report_inner_message() {
    let (invoker, _) = setup();
    let err = invoker.run(["chain"]).unwrap_err();
    assert_eq!(invocation_message(err), "model 'Order' has no primary key");
}

#[test]
fn test_round_trip_all_binding_kinds() {
    let (invoker, recorder) = setup();

    invoker
        .run(["page", "About", "-l", "_Wide", "--copies", "3", "--overwrite"])
        .unwrap();
    invoker.run(["page"]).unwrap();

    insta::assert_debug_snapshot!(recorder.take(), @r#"
    [
        "PageModel { name: Some(\"About\"), layout: \"_Wide\", copies: 3, overwrite: true }",
        "PageModel { name: None, layout: \"_Layout\", copies: 1, overwrite: false }",
    ]
    "#);
}

#[test]
fn test_help_is_a_usage_result() {
    let (invoker, recorder) = setup();

    for spelling in ["-?", "-h", "--help"] {
        let err = invoker.run(["page", spelling]).unwrap_err();
        assert!(err.is_help());
        assert_eq!(err.exit_code(), 0);
        assert!(err.to_string().contains("--layout"));
    }
    assert!(recorder.take().is_empty());
}

#[test]
fn test_unknown_argument_is_a_usage_error() {
    let (invoker, _) = setup();
    let err = invoker.run(["widget", "--nope"]).unwrap_err();

    assert!(matches!(err, Error::Usage(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_unknown_generator() {
    let (invoker, _) = setup();
    let err = invoker.run(["gizmo"]).unwrap_err();
    assert_eq!(err.to_string(), "no generator named 'gizmo' was found");
}

#[test]
fn test_model_construction_failure() {
    let (invoker, _) = setup();

    match invoker.run(["broken"]).unwrap_err() {
        Error::ModelConstruction { model, message } => {
            assert_eq!(model, "BrokenModel");
            assert_eq!(message, "model requires a project context");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_population_failure() {
    let (invoker, recorder) = setup();
    let err = invoker.run(["page", "--copies", "lots"]).unwrap_err();

    assert_eq!(
        invocation_message(err),
        "'lots' is not a valid number of copies"
    );
    assert!(recorder.take().is_empty());
}

#[test]
fn test_async_action_failure() {
    let (invoker, _) = setup();
    let err = invoker.run(["slow"]).unwrap_err();
    assert_eq!(invocation_message(err), "timed out waiting for templates");
}

#[test]
fn test_dispatched_failure_is_flattened() {
    let (invoker, _) = setup();
    let err = invoker.run(["area"]).unwrap_err();
    assert_eq!(invocation_message(err), "'many' is not a valid number of copies");

    let err = invoker.run(["scaffold"]).unwrap_err();
    assert_eq!(err.exit_code(), 1);
    assert_eq!(
        invocation_message(err),
        "unexpected argument '--nope' found"
    );
}

#[test]
fn test_missing_service_fails_generator_construction() {
    let registry = GeneratorRegistry::new(vec![library()]);
    let invoker = Invoker::new(Arc::new(registry), Services::new());

    let message = invocation_message(invoker.run(["widget"]).unwrap_err());
    assert!(message.starts_with("required service"));
    assert!(message.contains("Recorder"));
}
