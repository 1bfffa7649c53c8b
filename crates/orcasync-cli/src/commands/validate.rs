use super::common::RunOptions;

pub struct Validate;

impl Validate {
    pub fn execute(options: &RunOptions) -> anyhow::Result<()> {
        let engine = options.engine()?;
        println!("Validating OrcaSlicer user profile files...\n");

        let reports = engine.validate();
        for report in &reports {
            if report.checked == 0 {
                println!("[{}] No managed profile files found.", report.category);
            } else {
                println!(
                    "[{}] Checking {} managed file(s)...",
                    report.category, report.checked
                );
            }
        }

        let issues: Vec<_> = reports
            .iter()
            .flat_map(|report| report.issues.iter().map(move |issue| (report.category, issue)))
            .collect();
        let defects: usize = reports.iter().map(|report| report.defects().count()).sum();

        if issues.is_empty() {
            println!("\nAll managed Orca profiles are valid and standalone.");
            return Ok(());
        }

        println!("\nIssues found:");
        for (category, issue) in issues {
            let marker = if issue.is_notice() { "notice" } else { "error" };
            println!("- [{category}] {marker}: {issue}");
        }

        if defects > 0 {
            anyhow::bail!("{defects} profile defect(s) found");
        }

        Ok(())
    }
}
