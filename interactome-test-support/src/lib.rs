//! Shared test utilities used across interactome crates.

pub mod tracing {
    //! Recording layer for asserting spans and events in tests.
    use std::collections::BTreeMap;
    use std::fmt;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::registry::LookupSpan;

    /// Layer that keeps every closed span and emitted event so tests can
    /// assert on instrumentation after the fact.
    ///
    /// # Examples
    /// ```
    /// use interactome_test_support::tracing::RecordingLayer;
    /// use tracing_subscriber::layer::SubscriberExt;
    ///
    /// let layer = RecordingLayer::default();
    /// let subscriber = tracing_subscriber::registry().with(layer.clone());
    /// tracing::subscriber::with_default(subscriber, || {
    ///     let _entered = tracing::info_span!("core.example", items = 3).entered();
    ///     tracing::warn!(reason = "demo", "something odd");
    /// });
    ///
    /// let span = layer.span("core.example").expect("span recorded");
    /// assert_eq!(span.field("items"), Some("3"));
    /// assert!(layer.has_event(tracing::Level::WARN, "something odd"));
    /// ```
    #[derive(Clone, Default)]
    pub struct RecordingLayer {
        spans: Arc<Mutex<Vec<SpanRecord>>>,
        events: Arc<Mutex<Vec<EventRecord>>>,
    }

    fn guard<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    impl RecordingLayer {
        /// Closed spans in completion order.
        #[must_use]
        pub fn spans(&self) -> Vec<SpanRecord> {
            guard(&self.spans).clone()
        }

        /// Emitted events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<EventRecord> {
            guard(&self.events).clone()
        }

        /// The first closed span called `name`.
        #[must_use]
        pub fn span(&self, name: &str) -> Option<SpanRecord> {
            guard(&self.spans)
                .iter()
                .find(|span| span.name == name)
                .cloned()
        }

        /// Returns `true` when an event at `level` has a message containing
        /// `fragment`.
        #[must_use]
        pub fn has_event(&self, level: Level, fragment: &str) -> bool {
            guard(&self.events).iter().any(|event| {
                event.level == level
                    && event
                        .field("message")
                        .is_some_and(|message| message.contains(fragment))
            })
        }
    }

    /// A closed span with its recorded fields.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SpanRecord {
        /// Span name from the metadata.
        pub name: String,
        /// Fields recorded at creation or later via `Span::record`.
        pub fields: BTreeMap<String, String>,
    }

    impl SpanRecord {
        /// The recorded value of `name`, rendered as a string.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    /// An emitted event with its level, target and fields.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EventRecord {
        /// Event level.
        pub level: Level,
        /// Event target, usually the emitting module path.
        pub target: String,
        /// Structured fields, including `message`.
        pub fields: BTreeMap<String, String>,
    }

    impl EventRecord {
        /// The recorded value of `name`, rendered as a string.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    struct OpenSpan {
        name: &'static str,
        fields: BTreeMap<String, String>,
    }

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(
            &self,
            attrs: &tracing::span::Attributes<'_>,
            id: &tracing::span::Id,
            ctx: Context<'_, S>,
        ) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut open = OpenSpan {
                name: attrs.metadata().name(),
                fields: BTreeMap::new(),
            };
            attrs.record(&mut FieldRecorder(&mut open.fields));
            span.extensions_mut().insert(open);
        }

        fn on_record(
            &self,
            id: &tracing::span::Id,
            values: &tracing::span::Record<'_>,
            ctx: Context<'_, S>,
        ) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            if let Some(open) = span.extensions_mut().get_mut::<OpenSpan>() {
                values.record(&mut FieldRecorder(&mut open.fields));
            }
        }

        fn on_close(&self, id: tracing::span::Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let Some(open) = span.extensions_mut().remove::<OpenSpan>() else {
                return;
            };
            guard(&self.spans).push(SpanRecord {
                name: open.name.to_owned(),
                fields: open.fields,
            });
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = BTreeMap::new();
            event.record(&mut FieldRecorder(&mut fields));
            guard(&self.events).push(EventRecord {
                level: *event.metadata().level(),
                target: event.metadata().target().to_owned(),
                fields,
            });
        }
    }

    struct FieldRecorder<'a>(&'a mut BTreeMap<String, String>);

    impl FieldRecorder<'_> {
        fn put(&mut self, field: &Field, value: String) {
            self.0.insert(field.name().to_owned(), value);
        }
    }

    impl Visit for FieldRecorder<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.put(field, format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.put(field, value.to_owned());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.put(field, value.to_string());
        }

        fn record_bool(&mut self, field: &Field, value: bool) {
            self.put(field, value.to_string());
        }

        fn record_i64(&mut self, field: &Field, value: i64) {
            self.put(field, value.to_string());
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.put(field, value.to_string());
        }

        fn record_f64(&mut self, field: &Field, value: f64) {
            self.put(field, value.to_string());
        }
    }
}

pub mod fixtures {
    //! Small interaction networks reused across crates.

    /// Edges of the two-component scenario: a triangle and a pair.
    pub const SCENARIO_EDGES: [(&str, &str); 4] = [("A", "B"), ("B", "C"), ("A", "C"), ("D", "E")];

    /// Vertices of the two-component scenario.
    pub const SCENARIO_VERTICES: [&str; 5] = ["A", "B", "C", "D", "E"];

    /// Renders one PSI-MITAB line whose interactor columns carry the given
    /// gene symbols.
    ///
    /// # Examples
    /// ```
    /// use interactome_test_support::fixtures::mitab_line;
    ///
    /// let line = mitab_line("TP53", "MDM2");
    /// assert!(line.contains("uniprotkb:P04637_TP53(shortlabel)"));
    /// ```
    #[must_use]
    pub fn mitab_line(left: &str, right: &str) -> String {
        format!(
            "uniprotkb:{}\tuniprotkb:{}\tuniprotkb:{}_{left}(shortlabel)\tuniprotkb:{}_{right}(shortlabel)\tpsi-mi:\"MI:0018\"(two hybrid)",
            accession(left),
            accession(right),
            accession(left),
            accession(right),
        )
    }

    /// A MITAB document for [`SCENARIO_EDGES`] with a header and a malformed
    /// line mixed in.
    #[must_use]
    pub fn scenario_mitab() -> String {
        let mut document =
            String::from("#ID(s) interactor A\tID(s) interactor B\tAlt\tAlt\tMethod\n");
        for (left, right) in SCENARIO_EDGES {
            document.push_str(&mitab_line(left, right));
            document.push('\n');
        }
        document.push_str("not\ta\tmitab\tline\n");
        document
    }

    /// Gene-subset document listing [`SCENARIO_VERTICES`], one per line.
    #[must_use]
    pub fn scenario_genes() -> String {
        SCENARIO_VERTICES
            .iter()
            .map(|gene| format!("{gene}\n"))
            .collect()
    }

    fn accession(symbol: &str) -> &'static str {
        match symbol {
            "TP53" => "P04637",
            "MDM2" => "Q00987",
            _ => "P00000",
        }
    }
}

pub mod ci;
