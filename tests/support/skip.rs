/// Skip a test if AWS credentials or the live test references are missing.
#[macro_export]
macro_rules! skip_without_aws {
    () => {
        if std::env::var("AWS_ACCESS_KEY_ID").is_err() {
            eprintln!("SKIPPED: AWS_ACCESS_KEY_ID not set");
            return;
        }
        if std::env::var("CAISSON_TEST_STACK").is_err() {
            eprintln!("SKIPPED: CAISSON_TEST_STACK not set (set to a stack name or ARN)");
            return;
        }
        if std::env::var("CAISSON_TEST_SECRET").is_err() {
            eprintln!("SKIPPED: CAISSON_TEST_SECRET not set (set to a secret name or ARN)");
            return;
        }
    };
}
