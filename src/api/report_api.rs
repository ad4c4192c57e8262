// ==========================================
// 航班尾号分配系统 - 报表 API
// ==========================================
// 职责: 机尾日利用率报表的生成与导出
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::context::PlanningContext;
use crate::domain::utilization::UtilizationRow;
use crate::engine::calendar::ExpansionContext;
use crate::engine::repositories::PlanningRepositories;
use crate::engine::utilization::UtilizationAggregator;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::io::Write;
use tracing::instrument;

// ==========================================
// ReportApi - 报表 API
// ==========================================
pub struct ReportApi {
    repos: PlanningRepositories,
    aggregator: UtilizationAggregator,
}

impl ReportApi {
    pub fn new(repos: PlanningRepositories) -> Self {
        Self {
            repos,
            aggregator: UtilizationAggregator::default(),
        }
    }

    /// 覆盖缺省汇总引擎 (调整允许状态集合时使用)
    pub fn with_aggregator(mut self, aggregator: UtilizationAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// 生成报表区间 [from, to] 的机尾日利用率
    ///
    /// 展开实例与 tail_assignment 表中的分配记录关联,
    /// 当日无分配的实例不计入。
    #[instrument(skip(self, ctx), fields(operator = %ctx.operator_id, %from, %to))]
    pub fn utilization(
        &self,
        ctx: &PlanningContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ApiResult<Vec<UtilizationRow>> {
        let templates = self.repos.template_repo.list_all()?;
        let ectx = ExpansionContext {
            seasons: self.repos.season_repo.load_all()?,
            domestic_stations: self.repos.airport_repo.load_domestic_stations()?,
            pins: HashMap::new(),
        };
        let assignments = self.repos.assignment_repo.load_range(from, to)?;

        Ok(self
            .aggregator
            .aggregate(ctx, &templates, &ectx, from, to, &assignments))
    }

    /// 将利用率报表导出为 CSV
    pub fn export_csv<W: Write>(rows: &[UtilizationRow], writer: W) -> ApiResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record([
                "registration",
                "aircraft_type",
                "date",
                "block_minutes",
                "sector_count",
            ])
            .map_err(|e| ApiError::InternalError(format!("CSV 写入失败: {}", e)))?;

        for row in rows {
            let record = [
                row.registration.clone(),
                row.aircraft_type.clone(),
                row.date.to_string(),
                row.block_minutes.to_string(),
                row.sector_count.to_string(),
            ];
            csv_writer
                .write_record(&record)
                .map_err(|e| ApiError::InternalError(format!("CSV 写入失败: {}", e)))?;
        }

        csv_writer
            .flush()
            .map_err(|e| ApiError::InternalError(format!("CSV 写入失败: {}", e)))?;
        Ok(())
    }
}
