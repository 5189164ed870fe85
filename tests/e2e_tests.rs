//! End-to-end integration tests
//!
//! These tests validate the complete processing pipeline using predefined
//! CSV fixtures. Each test:
//! 1. Seeds a fresh store from accounts.csv
//! 2. Applies every operation in input.csv
//! 3. Writes the balances CSV
//! 4. Compares it with expected.csv
//!
//! Fixtures live in tests/fixtures/ and cover the happy path, every
//! rejection rule, malformed rows and decimal precision.
//!
//! Each fixture runs under both the sync and the async strategy.

#[cfg(test)]
mod tests {
    use account_balance_engine::cli::StrategyType;
    use account_balance_engine::core::InMemoryAccountStore;
    use account_balance_engine::io::load_accounts;
    use account_balance_engine::strategy::{create_strategy, BatchConfig};
    use account_balance_engine::types::RequestConfig;
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    /// Run a fixture and compare the balances CSV with expected.csv
    ///
    /// # Panics
    ///
    /// Panics if fixture files cannot be read or the output differs.
    fn run_test_fixture(fixture_name: &str, strategy_type: StrategyType) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let accounts_path = format!("{}/accounts.csv", fixture_dir);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        for path in [&accounts_path, &input_path, &expected_path] {
            assert!(Path::new(path).exists(), "Fixture file not found: {}", path);
        }

        let store = Arc::new(InMemoryAccountStore::new());
        load_accounts(Path::new(&accounts_path), &store)
            .unwrap_or_else(|e| panic!("Failed to seed accounts: {}", e));

        // Small batches so async runs cross batch boundaries
        let batch_config = BatchConfig::new(2, 4);
        let strategy = create_strategy(
            strategy_type.clone(),
            Some(batch_config),
            RequestConfig::default(),
        );

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");
        strategy
            .process(Path::new(&input_path), store, &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to process operations: {}", e));
        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("happy_path")]
    #[case("insufficient_funds")]
    #[case("currency_not_held")]
    #[case("unknown_account")]
    #[case("unrecognized_currency")]
    #[case("below_minimum")]
    #[case("new_currency_deposit")]
    #[case("malformed_data")]
    #[case("precision")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, strategy);
    }

    #[rstest]
    fn test_custom_minimum_amount(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy_type: StrategyType,
    ) {
        let mut input = NamedTempFile::new().expect("Failed to create temp file");
        input
            .write_all(
                b"type,iban,currency,amount\n\
                  deposit,ES6112343456420456323532,GBP,0.50\n\
                  debit,ES6112343456420456323532,GBP,0.25\n",
            )
            .expect("Failed to write to temp file");
        input.flush().expect("Failed to flush temp file");

        let store = Arc::new(InMemoryAccountStore::new());
        account_balance_engine::io::seed_demo_accounts(&store).unwrap();

        let config = RequestConfig {
            minimum_amount: "0.01".parse().unwrap(),
        };
        let strategy = create_strategy(strategy_type, None, config);
        let mut output = Vec::new();
        strategy.process(input.path(), store, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("ES6112343456420456323532,GBP,100.25\n"), "{}", output);
        assert!(output.contains("EE3822002210201578458065,USD,1000.00\n"), "{}", output);
    }
}
