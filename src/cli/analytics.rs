//! Analytics command handlers: the dashboard panels as tables.

use anyhow::Result;

use pathfinder::services::analytics::{
    AnalyticsFilters, CategoryData, DemandTrend, SalaryData, SkillData,
};
use pathfinder::utils::format::format_salary;

use super::{AnalyticsFilterArgs, AnalyticsSubcommand, App};

fn to_filters(args: AnalyticsFilterArgs) -> AnalyticsFilters {
    AnalyticsFilters {
        category: args.category,
        location: args.location,
        salary_min: args.salary_min,
        date_range: args.date_range,
    }
}

pub(crate) async fn cmd_analytics(app: &App, action: AnalyticsSubcommand) -> Result<()> {
    match action {
        AnalyticsSubcommand::Summary { filters, refresh } => {
            if refresh {
                let removed = app.analytics.clear_cache();
                println!("Cleared {removed} cached analytics entries.\n");
            }
            let summary = app.analytics.summary(&to_filters(filters)).await?;
            print_demand(&summary.demand);
            println!();
            print_salary(&summary.salary);
            println!();
            print_skills(&summary.skills);
            println!();
            print_categories(&summary.categories);
        }
        AnalyticsSubcommand::Demand { filters } => {
            print_demand(&app.analytics.demand_trends(&to_filters(filters)).await?);
        }
        AnalyticsSubcommand::Salary { filters } => {
            print_salary(&app.analytics.salary_data(&to_filters(filters)).await?);
        }
        AnalyticsSubcommand::Skills { filters } => {
            print_skills(&app.analytics.top_skills(&to_filters(filters)).await?);
        }
        AnalyticsSubcommand::Categories { filters } => {
            print_categories(&app.analytics.categories(&to_filters(filters)).await?);
        }
    }
    Ok(())
}

fn print_demand(trends: &[DemandTrend]) {
    println!("Demand trend");
    println!("{:<8} {:>10}", "Month", "Jobs");
    println!("{}", "-".repeat(19));
    for t in trends {
        println!("{:<8} {:>10}", t.month, t.jobs);
    }
}

fn print_salary(data: &[SalaryData]) {
    println!("Average salary by category");
    println!("{:<16} {:>12}", "Category", "Salary");
    println!("{}", "-".repeat(29));
    for d in data {
        println!("{:<16} {:>12}", d.category, format_salary(d.salary));
    }
}

fn print_skills(skills: &[SkillData]) {
    println!("Top skills");
    println!("{:<16} {:>10} {:<8}", "Skill", "Count", "Trend");
    println!("{}", "-".repeat(36));
    for s in skills {
        println!(
            "{:<16} {:>10} {:<8}",
            s.name,
            s.count,
            s.trend.as_deref().unwrap_or("-"),
        );
    }
}

fn print_categories(categories: &[CategoryData]) {
    println!("Postings by category");
    println!("{:<16} {:>10} {:>8}", "Category", "Count", "Share");
    println!("{}", "-".repeat(36));
    for c in categories {
        println!(
            "{:<16} {:>10} {:>7.1}%",
            c.name, c.count, c.percentage,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_convert_to_service_filters() {
        let args = AnalyticsFilterArgs {
            category: Some("tech".into()),
            location: None,
            salary_min: Some(60_000),
            date_range: Some("last-year".into()),
        };
        let filters = to_filters(args);
        assert_eq!(filters.category.as_deref(), Some("tech"));
        assert_eq!(filters.salary_min, Some(60_000));
        assert_eq!(filters.date_range.as_deref(), Some("last-year"));
        assert!(filters.location.is_none());
    }
}
