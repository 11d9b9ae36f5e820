//! End-to-end integration tests
//!
//! These tests validate the complete ledger processing pipeline using
//! predefined CSV test fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Applies all ledger records to their groups
//! 3. Generates the report CSV
//! 4. Compares actual output with expected.csv (settlements) or
//!    expected_balances.csv (balances)
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - The reference three-member scenario
//! - Even splits that do not divide into whole minor units
//! - Custom splits, including rejected inconsistent ones
//! - Member rename/removal and expense edit/delete
//! - Several interleaved groups, ties and zero-activity members
//! - Ties between members that joined out of id order
//! - Malformed and rejected rows
//!
//! Each fixture is run with both the synchronous and the async strategy.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use split_settle::cli::{ReportKind, StrategyType};
    use split_settle::config::EngineConfig;
    use split_settle::strategy::{create_strategy, BatchConfig, ReportOptions};
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Run a test fixture by processing input.csv and comparing with the
    /// expected report
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - Input or expected files cannot be read
    /// - Output doesn't match expected
    fn run_test_fixture(
        fixture_name: &str,
        strategy_type: StrategyType,
        config: Option<BatchConfig>,
        report: ReportKind,
    ) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = match report {
            ReportKind::Settlements => format!("{}/expected.csv", fixture_dir),
            ReportKind::Balances => format!("{}/expected_balances.csv", fixture_dir),
        };

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let options = ReportOptions {
            kind: report,
            engine: EngineConfig::default(),
        };
        let strategy = create_strategy(strategy_type, config, options);

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        strategy
            .process(Path::new(&input_path), &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to process ledger: {}", e));

        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));

        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?}, report: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, report, actual_output, expected_output
        );
    }

    /// End-to-end test for all fixtures with both strategies and both reports
    #[rstest]
    #[case("reference_scenario")]
    #[case("uneven_split")]
    #[case("custom_split")]
    #[case("member_lifecycle")]
    #[case("multiple_groups")]
    #[case("join_order_ties")]
    #[case("malformed_data")]
    #[case("empty_ledger")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
        #[values(ReportKind::Settlements, ReportKind::Balances)] report: ReportKind,
    ) {
        run_test_fixture(fixture, strategy, None, report);
    }

    /// Records of one group spread over many small batches
    #[rstest]
    #[case("member_lifecycle")]
    #[case("multiple_groups")]
    #[case("malformed_data")]
    fn test_fixtures_with_small_batches(
        #[case] fixture: &str,
        #[values(1, 3)] batch_size: usize,
    ) {
        run_test_fixture(
            fixture,
            StrategyType::Async,
            Some(BatchConfig::new(batch_size, 2)),
            ReportKind::Balances,
        );
    }

    #[rstest]
    fn test_missing_input_file(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let strategy = create_strategy(strategy, None, ReportOptions::default());
        let mut output = Vec::new();

        let result = strategy.process(Path::new("tests/fixtures/does_not_exist.csv"), &mut output);

        assert!(result.is_err());
    }
}
