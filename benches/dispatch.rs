//! Benchmarks for configuration dispatch
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use embed_harness::collaborator::{RequestFuture, SettingsPatch};
use embed_harness::embed::{defaults_for, SecondaryOption, SurfaceKind};
use embed_harness::{
    ConnectionFields, Embedder, EmbedType, FieldEdit, MountId, ReportMode, Session,
    SessionSettings, SurfaceDescriptor, SurfaceHandle, UserAction,
};

struct NullEmbedder;

struct NullHandle(SurfaceKind);

impl SurfaceHandle for NullHandle {
    fn kind(&self) -> SurfaceKind {
        self.0
    }

    fn update_settings(&self, _patch: SettingsPatch) -> RequestFuture {
        Box::pin(async { Ok(()) })
    }

    fn save(&self) -> RequestFuture {
        Box::pin(async { Ok(()) })
    }

    fn unmount(self: Box<Self>) {}
}

impl Embedder for NullEmbedder {
    fn mount(&mut self, _id: MountId, descriptor: &SurfaceDescriptor) -> Box<dyn SurfaceHandle> {
        Box::new(NullHandle(descriptor.kind().unwrap_or(SurfaceKind::Report)))
    }
}

fn bench_select_surface(c: &mut Criterion) {
    let mut record = defaults_for(
        EmbedType::Report,
        &ConnectionFields::new("Embed", "token", "https://app.example.com/reportEmbed"),
    );
    record.embed_id = "f6bfd646-b718-44dc-a378-b73e6b528204".to_string();
    record.started = true;

    c.bench_function("select_surface_report_view", |b| {
        b.iter(|| SurfaceDescriptor::from_record(black_box(&record)))
    });
}

fn bench_dispatch_cycle(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();

    c.bench_function("dispatch_edit_run_reset", |b| {
        b.iter_batched(
            || {
                let (_tx, rx) = crossbeam_channel::unbounded();
                Session::new(
                    NullEmbedder,
                    rx,
                    runtime.handle().clone(),
                    &SessionSettings::default(),
                )
            },
            |mut session| {
                session.dispatch(UserAction::SetField(FieldEdit::EmbedId("e1".into())));
                session.dispatch(UserAction::Run);
                session.dispatch(UserAction::SetField(FieldEdit::PageName("p1".into())));
                session.dispatch(UserAction::SelectOption(SecondaryOption::ReportMode(
                    ReportMode::Create,
                )));
                session.dispatch(UserAction::SelectEmbedType(EmbedType::Tile));
                black_box(session.surface())
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_select_surface, bench_dispatch_cycle);
criterion_main!(benches);
