use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("CATALOG_PATH").map(PathBuf::from));

    let summary = match skill4edge_rust::load_catalog(path.as_deref()) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("catalog-check failed: {e:#}");
            std::process::exit(1);
        }
    };

    let source = path.map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string());
    println!("catalog ok ({source})");
    println!("  credentials:  {}", summary.credentials);
    println!("  students:     {}", summary.students);
    println!("  instructors:  {}", summary.instructors);
    println!("  admins:       {}", summary.admins);
    println!("  courses:      {} ({} lessons)", summary.courses, summary.lessons);
    println!("  enrollments:  {}", summary.enrollments);
    println!("  tests:        {}", summary.tests);
    println!("  test results: {}", summary.test_results);

    Ok(())
}
