#[cfg(test)]
pub mod test {
    use std::{
        fs,
        path::{Path, PathBuf},
    };

    use crate::{
        engine::{SimulationEngine, SimulationOptions, MAX_FRAMES},
        error::SimError,
        report::AccessOutcome,
        storage::trace::{Trace, TraceRecord},
        utils::replacer::Policy,
    };

    fn options(policy: Policy, num_frames: usize) -> SimulationOptions {
        let options = SimulationOptions::new(num_frames, policy).seed(1550);
        match policy {
            Policy::Nru => options.refresh(4),
            _ => options,
        }
    }

    fn run(
        policy: Policy,
        num_frames: usize,
        records: &[TraceRecord],
    ) -> (Vec<AccessOutcome>, crate::report::Report) {
        let engine = SimulationEngine::new(options(policy, num_frames)).unwrap();
        let mut outcomes = Vec::new();
        let report = engine
            .run_records(records, |_, _, outcome| outcomes.push(outcome))
            .unwrap();
        (outcomes, report)
    }

    const ALL: [Policy; 4] = [Policy::Opt, Policy::Clock, Policy::Nru, Policy::Fifo];

    #[test]
    fn three_frames_one_recurring_page() {
        let records: Vec<_> = [1, 2, 3, 1, 4].into_iter().map(TraceRecord::read).collect();

        for policy in ALL {
            let (outcomes, report) = run(policy, 3, &records);

            assert_eq!(
                outcomes,
                vec![
                    AccessOutcome::FaultNoEviction,
                    AccessOutcome::FaultNoEviction,
                    AccessOutcome::FaultNoEviction,
                    AccessOutcome::Hit,
                    AccessOutcome::FaultEvictClean,
                ],
                "{policy}"
            );
            assert_eq!(report.statistics.accesses, 5);
            assert_eq!(report.statistics.faults, 4);
            assert_eq!(report.statistics.hits, 1);
            assert_eq!(report.statistics.disk_writes, 0);
            assert_eq!(report.algorithm, policy.display_name());
        }
    }

    #[test]
    fn single_frame_dirty_writeback() {
        let records = [TraceRecord::write(0xA), TraceRecord::read(0xB)];

        for policy in ALL {
            let (outcomes, report) = run(policy, 1, &records);

            assert_eq!(
                outcomes,
                vec![AccessOutcome::FaultNoEviction, AccessOutcome::FaultEvictDirty]
            );
            assert_eq!(report.statistics.disk_writes, 1);
            assert_eq!(report.statistics.faults, 2);
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let records: Vec<_> = (0..300u64)
            .map(|i| match i % 5 {
                0 => TraceRecord::write(i % 9),
                _ => TraceRecord::read((i * 13) % 17),
            })
            .collect();

        for policy in ALL {
            let first = run(policy, 4, &records);
            let second = run(policy, 4, &records);
            assert_eq!(first, second, "{policy}");
        }
    }

    #[test]
    fn runs_from_a_trace_file() {
        let path = trace_path("runs_from_a_trace_file");
        fs::write(&path, "00001000 R\n00002000 W\n00001abc R\n00003000 R\n").unwrap();

        let trace = Trace::open(&path, 4096).unwrap();
        let engine = SimulationEngine::new(options(Policy::Clock, 2)).unwrap();

        let mut seen = Vec::new();
        let report = engine
            .run(&trace, |index, record, outcome| seen.push((index, record.page, outcome)))
            .unwrap();

        assert_eq!(
            seen,
            vec![
                (0, 1, AccessOutcome::FaultNoEviction),
                (1, 2, AccessOutcome::FaultNoEviction),
                (2, 1, AccessOutcome::Hit),
                (3, 3, AccessOutcome::FaultEvictClean),
            ]
        );
        assert_eq!(report.num_frames, 2);

        teardown(&path);
    }

    #[test]
    fn malformed_trace_produces_nothing() {
        let trace = Trace::from_bytes(&b"00001000 R\nnot-an-address W\n"[..], 4096);
        let engine = SimulationEngine::new(options(Policy::Opt, 2)).unwrap();

        let mut calls = 0;
        let result = engine.run(&trace, |_, _, _| calls += 1);

        assert!(matches!(
            result,
            Err(SimError::MalformedTraceRecord { line: 2, .. })
        ));
        assert_eq!(calls, 0);
    }

    #[test]
    fn missing_trace_file() {
        let path = trace_path("missing_trace_file");
        assert!(matches!(
            Trace::open(&path, 4096),
            Err(SimError::TraceFileUnreadable { .. })
        ));
    }

    #[test]
    fn nru_needs_a_refresh_interval() {
        let result = SimulationEngine::new(SimulationOptions::new(4, Policy::Nru));
        assert!(matches!(
            result,
            Err(SimError::InvalidArguments { arg: "-r", .. })
        ));
    }

    #[test]
    fn frame_count_is_capped() {
        assert!(SimulationEngine::new(SimulationOptions::new(MAX_FRAMES, Policy::Clock)).is_ok());

        let result = SimulationEngine::new(SimulationOptions::new(MAX_FRAMES + 1, Policy::Clock));
        assert!(matches!(
            result,
            Err(SimError::InvalidArguments { arg: "-n", .. })
        ));
    }

    #[test]
    fn page_size_groups_addresses() {
        let options = SimulationOptions::new(1, Policy::Opt).page_size(0x100);
        let engine = SimulationEngine::new(options).unwrap();
        let trace = Trace::from_bytes(
            &b"00000100 R\n000001ff W\n00000200 R\n"[..],
            engine.options().page_size,
        );

        let mut seen = Vec::new();
        let report = engine
            .run(&trace, |_, record, outcome| seen.push((record.page, outcome)))
            .unwrap();

        assert_eq!(
            seen,
            vec![
                (1, AccessOutcome::FaultNoEviction),
                (1, AccessOutcome::Hit),
                (2, AccessOutcome::FaultEvictDirty),
            ]
        );
        assert_eq!(report.statistics.disk_writes, 1);
    }

    #[test]
    fn unreadable_file_error_names_only_the_path() {
        let path = trace_path("unreadable_file_error_names_only_the_path");
        let err = Trace::open(&path, 4096).unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("unable to read trace file {}", path.display())
        );
    }

    fn trace_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vmsim_{}_{}.trace", name, std::process::id()))
    }

    fn teardown(path: &Path) {
        fs::remove_file(path).unwrap();
    }
}
