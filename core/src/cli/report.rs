use crate::api::ReportLabels;
use crate::dataset::OutputTable;
use crate::types::{AcrDensity, ACR_DENSITIES, MAX_BIRADS_CATEGORY};
use std::fmt;

/// Text report formatter for the labels of a single report
pub struct TextReport<'a> {
    labels: &'a ReportLabels,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(labels: &'a ReportLabels) -> Self {
        Self { labels }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Report Labels")?;
        writeln!(f, "=============")?;
        writeln!(f)?;

        match self.labels.birads {
            Some(birads) => writeln!(f, "BI-RADS:        {}", birads)?,
            None => writeln!(f, "BI-RADS:        unknown")?,
        }
        if let Some(rule) = self.labels.birads_rule {
            writeln!(f, "Matched Rule:   {}", rule)?;
        }
        match self.labels.acr {
            Some(acr) => writeln!(f, "ACR Density:    {} ({})", acr, acr.description())?,
            None => writeln!(f, "ACR Density:    unknown")?,
        }

        Ok(())
    }
}

/// Summary of the labels in an output table
pub struct SummaryReport<'a> {
    table: &'a OutputTable,
}

impl<'a> SummaryReport<'a> {
    /// Creates a new summary report
    pub fn new(table: &'a OutputTable) -> Self {
        Self { table }
    }

    /// Number of rows with a BI-RADS label
    pub fn birads_found(&self) -> usize {
        self.table.iter().filter(|r| r.birads.is_some()).count()
    }

    /// Number of rows with an ACR density
    pub fn acr_found(&self) -> usize {
        self.table.iter().filter(|r| r.acr.is_some()).count()
    }

    /// Number of rows with a fractional BI-RADS value
    pub fn fractional(&self) -> usize {
        self.table
            .iter()
            .filter(|r| r.birads.is_some_and(|b| b.is_fractional()))
            .count()
    }

    /// Row counts per whole BI-RADS category, index = category
    pub fn birads_histogram(&self) -> Vec<usize> {
        let mut counts = vec![0; usize::from(MAX_BIRADS_CATEGORY) + 1];
        for birads in self.table.iter().filter_map(|r| r.birads) {
            counts[usize::from(birads.category())] += 1;
        }
        counts
    }

    /// Number of rows graded as dense tissue (ACR C or D)
    pub fn dense(&self) -> usize {
        self.table
            .iter()
            .filter(|r| r.acr.is_some_and(|a| a.is_dense()))
            .count()
    }

    /// Row count for one ACR density
    pub fn acr_count(&self, density: AcrDensity) -> usize {
        self.table
            .iter()
            .filter(|r| r.acr == Some(density))
            .count()
    }
}

impl<'a> fmt::Display for SummaryReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.table.len();

        writeln!(f, "Extraction Summary")?;
        writeln!(f, "==================")?;
        writeln!(f)?;
        writeln!(f, "Reports:          {}", total)?;
        writeln!(
            f,
            "BI-RADS found:    {} ({} unknown)",
            self.birads_found(),
            total - self.birads_found()
        )?;
        writeln!(
            f,
            "ACR found:        {} ({} unknown)",
            self.acr_found(),
            total - self.acr_found()
        )?;
        writeln!(f)?;

        writeln!(f, "BI-RADS Categories")?;
        writeln!(f, "------------------")?;
        for (category, count) in self.birads_histogram().iter().enumerate() {
            writeln!(f, "{}: {}", category, count)?;
        }
        writeln!(f, "fractional: {}", self.fractional())?;
        writeln!(f)?;

        writeln!(f, "ACR Density")?;
        writeln!(f, "-----------")?;
        for density in ACR_DENSITIES {
            writeln!(f, "{}: {}", density, self.acr_count(density))?;
        }
        writeln!(f, "dense (C/D): {}", self.dense())?;

        Ok(())
    }
}
