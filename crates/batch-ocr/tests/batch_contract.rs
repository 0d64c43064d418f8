use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use batch_ocr::{BatchProcessor, EngineAdapter, OcrEngine, OcrError, ProgressEvent};

/// Engine scripted per basename: `Ok(text)` entries succeed, `Err(message)`
/// entries fail item-level. Unknown basenames recognize as empty text.
struct ScriptedEngine {
    available: bool,
    script: Vec<(&'static str, Result<&'static str, &'static str>)>,
    log: Arc<Mutex<Vec<String>>>,
}

impl ScriptedEngine {
    fn new(script: Vec<(&'static str, Result<&'static str, &'static str>)>) -> Self {
        Self {
            available: true,
            script,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn offline() -> Self {
        Self {
            available: false,
            script: Vec::new(),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl OcrEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn probe(&self) -> Result<(), OcrError> {
        if self.available {
            Ok(())
        } else {
            Err(OcrError::unavailable("scripted engine is offline"))
        }
    }

    fn recognize(&self, path: &Path) -> Result<String, OcrError> {
        let basename = path.file_name().unwrap().to_string_lossy().into_owned();
        self.log.lock().unwrap().push(format!("recognize {basename}"));
        match self.script.iter().find(|(name, _)| *name == basename) {
            Some((_, Ok(text))) => Ok(text.to_string()),
            Some((_, Err(message))) => Err(OcrError::decode(path, *message)),
            None => Ok(String::new()),
        }
    }
}

fn processor(engine: ScriptedEngine) -> (BatchProcessor, Arc<Mutex<Vec<String>>>) {
    let log = engine.log.clone();
    let adapter = EngineAdapter::new(Arc::new(engine));
    (BatchProcessor::new(adapter), log)
}

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

#[test]
fn successful_batch_preserves_order_and_emits_progress() {
    let engine = ScriptedEngine::new(vec![
        ("a.png", Ok("  hello  ")),
        ("b.png", Ok("world")),
        ("c.png", Ok("")),
    ]);
    let (processor, _) = processor(engine);
    let images = paths(&["in/a.png", "in/b.png", "in/c.png"]);

    let mut events = Vec::new();
    let mut observer = |event: ProgressEvent| events.push(event);
    let result = processor
        .process_batch(&images, Some(&mut observer))
        .unwrap();

    let entries: Vec<_> = result.iter().collect();
    assert_eq!(
        entries,
        vec![
            (Path::new("in/a.png"), "hello"),
            (Path::new("in/b.png"), "world"),
            (Path::new("in/c.png"), ""),
        ]
    );

    assert_eq!(events.len(), 3);
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event.index, i);
        assert_eq!(event.total, 3);
    }
    let labels: Vec<_> = events.iter().map(|event| event.label.as_str()).collect();
    assert_eq!(labels, vec!["a.png", "b.png", "c.png"]);
}

#[test]
fn empty_input_yields_empty_result_without_events() {
    let (processor, _) = processor(ScriptedEngine::new(Vec::new()));

    let mut events = Vec::new();
    let mut observer = |event: ProgressEvent| events.push(event);
    let result = processor.process_batch(&[], Some(&mut observer)).unwrap();

    assert!(result.is_empty());
    assert!(events.is_empty());
}

#[test]
fn unavailable_engine_fails_fast_with_zero_items() {
    let (processor, log) = processor(ScriptedEngine::offline());
    assert!(!processor.is_available());

    let images = paths(&["a.png", "b.png"]);
    let mut events = Vec::new();
    let mut observer = |event: ProgressEvent| events.push(event);
    let err = processor
        .process_batch(&images, Some(&mut observer))
        .unwrap_err();

    assert!(err.is_unavailable());
    assert!(events.is_empty());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn one_failing_item_never_sinks_the_batch() {
    let engine = ScriptedEngine::new(vec![
        ("a.png", Ok("alpha")),
        ("b.png", Err("corrupt image")),
        ("c.png", Ok("gamma")),
    ]);
    let (processor, _) = processor(engine);
    let images = paths(&["a.png", "b.png", "c.png"]);

    let mut events = Vec::new();
    let mut observer = |event: ProgressEvent| events.push(event);
    let result = processor
        .process_batch(&images, Some(&mut observer))
        .unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(result.get(Path::new("a.png")), Some("alpha"));
    assert_eq!(result.get(Path::new("b.png")), Some(""));
    assert_eq!(result.get(Path::new("c.png")), Some("gamma"));

    let indices: Vec<_> = events.iter().map(|event| event.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn progress_is_reported_before_each_recognition_attempt() {
    let engine = ScriptedEngine::new(vec![("a.png", Ok("x")), ("b.png", Err("bad"))]);
    let log = engine.log.clone();
    let (processor, _) = processor(engine);
    let images = paths(&["a.png", "b.png"]);

    let observer_log = log.clone();
    let mut observer = |event: ProgressEvent| {
        observer_log
            .lock()
            .unwrap()
            .push(format!("progress {}", event.label));
    };
    processor
        .process_batch(&images, Some(&mut observer))
        .unwrap();

    let recorded = log.lock().unwrap().clone();
    assert_eq!(
        recorded,
        vec![
            "progress a.png",
            "recognize a.png",
            "progress b.png",
            "recognize b.png",
        ]
    );
}

#[test]
fn processing_works_without_an_observer() {
    let (processor, _) = processor(ScriptedEngine::new(vec![("a.png", Ok("text"))]));
    let result = processor.process_batch(&paths(&["a.png"]), None).unwrap();
    assert_eq!(result.get(Path::new("a.png")), Some("text"));
}

/// Engine returning a distinct value per call, to observe which occurrence
/// of a duplicated input wins.
struct CountingEngine {
    calls: AtomicUsize,
}

impl OcrEngine for CountingEngine {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn probe(&self) -> Result<(), OcrError> {
        Ok(())
    }

    fn recognize(&self, _: &Path) -> Result<String, OcrError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("call-{call}"))
    }
}

#[test]
fn duplicate_inputs_collapse_to_the_last_processed_value() {
    let adapter = EngineAdapter::new(Arc::new(CountingEngine {
        calls: AtomicUsize::new(0),
    }));
    let processor = BatchProcessor::new(adapter);
    let images = paths(&["a.png", "b.png", "a.png"]);

    let mut events = Vec::new();
    let mut observer = |event: ProgressEvent| events.push(event);
    let result = processor
        .process_batch(&images, Some(&mut observer))
        .unwrap();

    // Three attempts, three progress events, but only two entries: "a.png"
    // keeps its first position and holds the value of its last occurrence.
    assert_eq!(events.len(), 3);
    let entries: Vec<_> = result.iter().collect();
    assert_eq!(
        entries,
        vec![(Path::new("a.png"), "call-2"), (Path::new("b.png"), "call-1")]
    );
}
