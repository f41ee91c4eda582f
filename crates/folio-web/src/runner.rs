use folio_fx::{
    Cadence, ConfigError, ElementId, FrameClock, FxConfig, PageEvent,
    PhraseList, PointerTracker, PositionSink, RevealSink, RevealTrigger, TextSink,
    Typewriter, TypewriterTask, VisibilitySource,
};

/// Wires the three page effects to host events and a frame clock.
///
/// Generic over the output targets so the same wiring runs against DOM
/// elements in the browser and against recording structs in tests. The
/// browser keeps one runner in a `thread_local!` and feeds it from event
/// listeners and `requestAnimationFrame`.
pub struct PageRunner<G, T, R>
where
    G: PositionSink,
    T: TextSink,
    R: RevealSink + VisibilitySource,
{
    pointer: PointerTracker<G>,
    typewriter: TypewriterTask<T>,
    reveal: RevealTrigger,
    reveal_target: R,
    clock: FrameClock,
    initialized: bool,
    running: bool,
}

impl<G, T, R> PageRunner<G, T, R>
where
    G: PositionSink,
    T: TextSink,
    R: RevealSink + VisibilitySource,
{
    /// Build the effects from config. Missing targets are passed as `None`
    /// and the matching effect becomes a no-op.
    pub fn new(
        config: &FxConfig,
        glow: Option<G>,
        text: Option<T>,
        reveal_target: R,
        candidates: Vec<ElementId>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let phrases = PhraseList::new(config.typewriter.phrases.iter().cloned())?;
        let writer = Typewriter::new(phrases, Cadence::from(&config.typewriter));

        Ok(Self {
            pointer: PointerTracker::new(glow),
            typewriter: TypewriterTask::new(writer, text),
            reveal: RevealTrigger::new(config.reveal.threshold, candidates),
            reveal_target,
            clock: FrameClock::default(),
            initialized: false,
            running: false,
        })
    }

    /// Start observing reveal candidates and start the typewriter.
    /// Call once, when the document is ready.
    pub fn init(&mut self, timestamp_ms: f64) {
        if self.initialized {
            return;
        }
        let now = self.clock.frame(timestamp_ms);
        self.reveal.observe_all(&mut self.reveal_target);
        self.typewriter.start(now);
        self.initialized = true;
        self.running = true;
        log::info!(
            "page effects ready: glow={} typewriter={} reveal={}",
            self.pointer.has_target(),
            self.typewriter.is_running(),
            self.reveal.candidates().len(),
        );
    }

    /// Feed one host event. Both kinds are applied on the spot and do not
    /// depend on the frame loop. Intersections before [`init`](Self::init)
    /// are dropped, since nothing is observed yet.
    pub fn push_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::PointerMove { x, y } => self.pointer.on_pointer_move(x, y),
            PageEvent::Intersection(entry) => {
                if !self.initialized {
                    log::trace!("reveal: entry for {:?} before init, dropped", entry.target);
                    return;
                }
                self.reveal.handle_entries(&[entry], &mut self.reveal_target);
            }
        }
    }

    /// Run one frame at host time `timestamp_ms`: fire every typewriter
    /// timer that is due.
    pub fn frame(&mut self, timestamp_ms: f64) {
        if !self.initialized {
            return;
        }
        let now = self.clock.frame(timestamp_ms);
        if self.running {
            self.typewriter.advance_to(now);
        }
    }

    /// Pause the typewriter. Pointer tracking and reveals keep working, even
    /// with no frames arriving.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.typewriter.stop();
        log::info!("page effects paused");
    }

    /// Resume after [`stop`](Self::stop). Time spent stopped is skipped.
    pub fn resume(&mut self, timestamp_ms: f64) {
        if !self.initialized || self.running {
            return;
        }
        self.clock.reanchor();
        let now = self.clock.frame(timestamp_ms);
        self.typewriter.start(now);
        self.running = true;
        log::info!("page effects resumed");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pointer(&self) -> &PointerTracker<G> {
        &self.pointer
    }

    pub fn typewriter(&self) -> &TypewriterTask<T> {
        &self.typewriter
    }

    pub fn reveal(&self) -> &RevealTrigger {
        &self.reveal
    }

    pub fn reveal_target(&self) -> &R {
        &self.reveal_target
    }
}
