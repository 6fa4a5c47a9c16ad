//! Integration tests for gc-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, AGENT_FRAMES_FILE, TICK_SUMMARIES_FILE};
    use crate::row::{AgentFrameRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(
            headers(&dir.path().join(AGENT_FRAMES_FILE)),
            ["tick", "agent_id", "row", "col", "route_remaining"]
        );
        assert_eq!(
            headers(&dir.path().join(TICK_SUMMARIES_FILE)),
            ["tick", "player_row", "player_col", "agents", "replans"]
        );
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("pursuit");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join(AGENT_FRAMES_FILE).exists());
    }

    #[test]
    fn rows_are_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = [
            AgentFrameRow { tick: 3, agent_id: 0, row: 1, col: 2, route_remaining: 7 },
            AgentFrameRow { tick: 3, agent_id: 1, row: 9, col: 0, route_remaining: 0 },
        ];
        w.write_agent_frames(&rows).unwrap();
        w.write_tick_summary(&TickSummaryRow { tick: 3, player_row: 4, player_col: 5, agents: 2, replans: 1 })
            .unwrap();
        w.finish().unwrap();
        // Second finish is a no-op.
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(AGENT_FRAMES_FILE)).unwrap();
        let records: Vec<Vec<String>> = rdr
            .records()
            .map(|r| r.unwrap().iter().map(str::to_owned).collect())
            .collect();
        assert_eq!(records, vec![vec!["3", "0", "1", "2", "7"], vec!["3", "1", "9", "0", "0"]]);

        let mut rdr = csv::Reader::from_path(dir.path().join(TICK_SUMMARIES_FILE)).unwrap();
        let summary: Vec<String> = rdr.records().next().unwrap().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(summary, ["3", "4", "5", "2", "1"]);
    }

    #[test]
    fn counts_past_u32_are_written_in_full() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let big = u64::from(u32::MAX) + 7;
        w.write_agent_frames(&[AgentFrameRow { tick: big, agent_id: 0, row: 0, col: 0, route_remaining: big }])
            .unwrap();
        w.write_tick_summary(&TickSummaryRow { tick: 1, player_row: 0, player_col: 0, agents: big, replans: big })
            .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(AGENT_FRAMES_FILE)).unwrap();
        let rec = rdr.records().next().unwrap().unwrap();
        assert_eq!(rec[4].parse::<u64>().unwrap(), big);
        let mut rdr = csv::Reader::from_path(dir.path().join(TICK_SUMMARIES_FILE)).unwrap();
        let rec = rdr.records().next().unwrap().unwrap();
        assert_eq!(&rec[3], big.to_string());
        assert_eq!(&rec[4], big.to_string());
    }

    #[test]
    fn counts_widen_without_loss() {
        assert_eq!(crate::recorder::count(0), 0);
        assert_eq!(crate::recorder::count(u32::MAX as usize + 1), u64::from(u32::MAX) + 1);
    }
}

#[cfg(test)]
mod recorder_tests {
    use tempfile::TempDir;

    use gc_behavior::ChasePlayer;
    use gc_core::{Cell, SimConfig};
    use gc_sim::{RunOutcome, SimBuilder};
    use gc_spatial::{AStarPathfinder, GridMap};

    use crate::csv::{AGENT_FRAMES_FILE, TICK_SUMMARIES_FILE};
    use crate::{AgentFrameRow, CsvWriter, FrameRecorder, OutputError, OutputResult, OutputWriter, TickSummaryRow};

    /// Keeps rows in memory.
    #[derive(Default)]
    struct MemWriter {
        agents:    Vec<AgentFrameRow>,
        summaries: Vec<TickSummaryRow>,
        finished:  usize,
    }

    impl OutputWriter for MemWriter {
        fn write_agent_frames(&mut self, rows: &[AgentFrameRow]) -> OutputResult<()> {
            self.agents.extend_from_slice(rows);
            Ok(())
        }

        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            self.summaries.push(*row);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    /// Fails every summary write.
    struct BrokenWriter;

    impl OutputWriter for BrokenWriter {
        fn write_agent_frames(&mut self, _rows: &[AgentFrameRow]) -> OutputResult<()> {
            Ok(())
        }

        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    fn config() -> SimConfig {
        SimConfig { total_ticks: 50, ..SimConfig::default() }
    }

    #[test]
    fn records_one_row_per_agent_per_frame() {
        let mut sim = SimBuilder::new(config(), GridMap::open(1, 6).unwrap(), ChasePlayer, AStarPathfinder)
            .player(Cell::new(0, 5))
            .agent(Cell::new(0, 0))
            .agent(Cell::new(0, 1))
            .build()
            .unwrap();
        let mut rec = FrameRecorder::new(MemWriter::default());
        let outcome = sim.run(&mut rec).unwrap();
        // Agent 1 is one cell closer and catches first, at tick 3.
        assert!(matches!(outcome, RunOutcome::Caught { agent, .. } if agent.0 == 1));
        assert!(rec.take_error().is_none());
        assert_eq!(rec.frames_recorded(), 4);

        let w = rec.into_writer();
        assert_eq!(w.finished, 1);
        assert_eq!(w.agents.len(), 8);
        assert_eq!(w.summaries.len(), 4);
        assert_eq!(w.summaries[0], TickSummaryRow { tick: 0, player_row: 0, player_col: 5, agents: 2, replans: 2 });
        assert!(w.summaries[1..].iter().all(|s| s.replans == 0));
        // After tick 0 agent 0 stands on (0, 1) with 4 cells to go.
        assert_eq!(w.agents[0], AgentFrameRow { tick: 0, agent_id: 0, row: 0, col: 1, route_remaining: 4 });
        let last = w.agents.last().unwrap();
        assert_eq!((last.agent_id, last.col, last.route_remaining), (1, 5, 0));
    }

    #[test]
    fn first_error_is_kept() {
        let mut sim = SimBuilder::new(config(), GridMap::open(3, 3).unwrap(), ChasePlayer, AStarPathfinder)
            .build()
            .unwrap();
        let mut rec = FrameRecorder::new(BrokenWriter);
        sim.run_ticks(3, &mut rec).unwrap();
        assert!(matches!(rec.take_error(), Some(OutputError::Io(_))));
        assert!(rec.take_error().is_none());
    }

    #[test]
    fn csv_run_end_to_end() {
        let dir: TempDir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut sim = SimBuilder::new(config(), GridMap::open(4, 4).unwrap(), ChasePlayer, AStarPathfinder)
            .player(Cell::new(3, 3))
            .agent(Cell::new(0, 0))
            .build()
            .unwrap();
        let mut rec = FrameRecorder::new(writer);
        sim.run(&mut rec).unwrap();
        assert!(rec.take_error().is_none());

        let agent_rows = csv::Reader::from_path(dir.path().join(AGENT_FRAMES_FILE))
            .unwrap()
            .records()
            .count();
        let summary_rows = csv::Reader::from_path(dir.path().join(TICK_SUMMARIES_FILE))
            .unwrap()
            .records()
            .count();
        // Six moves, one per tick.
        assert_eq!(agent_rows, 6);
        assert_eq!(summary_rows, 6);
    }
}
