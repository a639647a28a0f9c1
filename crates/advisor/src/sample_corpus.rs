use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

struct SampleDocument {
    file_name: &'static str,
    title: &'static str,
    sections: &'static [(&'static str, &'static str)],
}

const DOCUMENTS: &[SampleDocument] = &[
    SampleDocument {
        file_name: "investment_strategies.txt",
        title: "Investment Strategies for Modern Portfolios",
        sections: &[
            (
                "Diversification Principles",
                "A well-diversified portfolio requires strategic allocation across multiple asset classes. \
                 Modern portfolio theory suggests including a mix of stocks (40-60%), bonds (20-40%), and \
                 alternative investments (10-20%). Geographic diversification across developed and emerging \
                 markets provides further risk reduction benefits.",
            ),
            (
                "Risk Management Framework",
                "Effective risk management involves regular portfolio rebalancing, position sizing, and \
                 monitoring market conditions. Setting clear stop-loss levels and implementing hedging \
                 strategies during volatile market periods helps preserve capital while allowing for optimal \
                 growth opportunities.",
            ),
            (
                "Long-term Investment Approach",
                "Successful investors focus on long-term wealth creation rather than short-term market \
                 fluctuations. This approach involves dollar-cost averaging, dividend reinvestment, and \
                 tax-efficient investment strategies that compound returns over extended periods.",
            ),
        ],
    },
    SampleDocument {
        file_name: "retirement_planning.txt",
        title: "Comprehensive Retirement Planning Guide",
        sections: &[
            (
                "Retirement Income Strategies",
                "A successful retirement plan should aim to replace 70-80% of pre-retirement income. This \
                 typically comes from multiple sources: Social Security benefits, employer-sponsored \
                 retirement plans (401(k), 403(b), pension), and personal savings including IRAs and taxable \
                 investment accounts.",
            ),
            (
                "Tax-Efficient Withdrawal Strategies",
                "Strategic withdrawals from retirement accounts can significantly impact tax liability. \
                 Generally, it's advisable to withdraw from taxable accounts first, then tax-deferred accounts \
                 like traditional IRAs and 401(k)s, and finally tax-free accounts like Roth IRAs. This strategy \
                 often maximizes after-tax retirement income.",
            ),
            (
                "Long-term Care Planning",
                "Approximately 70% of retirees will require some form of long-term care. Options for funding \
                 include long-term care insurance, health savings accounts (HSAs), self-funding through \
                 investments, and Medicaid planning. The ideal strategy depends on individual health factors \
                 and financial resources.",
            ),
        ],
    },
    SampleDocument {
        file_name: "tax_optimization.txt",
        title: "Tax Optimization Strategies for Investors",
        sections: &[
            (
                "Tax-Loss Harvesting",
                "Tax-loss harvesting involves selling investments that have experienced losses to offset \
                 capital gains tax liability. This strategy can reduce taxable income by up to $3,000 per \
                 year, with additional losses carried forward to future tax years. It's particularly \
                 effective when rebalancing portfolios in tax-inefficient accounts.",
            ),
            (
                "Tax-Advantaged Accounts",
                "Maximizing contributions to tax-advantaged accounts like 401(k)s, IRAs, and HSAs can \
                 significantly reduce current and future tax liability. For 2023, contribution limits are \
                 $22,500 for 401(k)s, $6,500 for IRAs, and $3,850 for individual HSAs. Catch-up \
                 contributions are available for those over 50.",
            ),
            (
                "Asset Location Strategy",
                "Strategic placement of investments across taxable and tax-advantaged accounts can enhance \
                 after-tax returns. Generally, tax-inefficient investments (bonds, REITs) should be held in \
                 tax-advantaged accounts, while tax-efficient investments (index funds, growth stocks) are \
                 better suited for taxable accounts.",
            ),
        ],
    },
    SampleDocument {
        file_name: "market_analysis.txt",
        title: "Current Market Analysis and Economic Outlook",
        sections: &[
            (
                "Economic Indicators and Market Performance",
                "Key economic indicators including GDP growth, inflation rates, unemployment figures, and \
                 central bank policies provide essential context for investment decisions. These \
                 macroeconomic factors influence sector performance and should inform strategic asset \
                 allocation decisions.",
            ),
            (
                "Sector Rotation Strategies",
                "Different market sectors perform optimally at various points in the economic cycle. During \
                 economic expansion, cyclical sectors like technology and consumer discretionary typically \
                 outperform. In contrast, defensive sectors like utilities and consumer staples often excel \
                 during economic contractions.",
            ),
            (
                "Valuation Metrics",
                "Fundamental analysis relies on valuation metrics such as P/E ratios, price-to-book ratios, \
                 and dividend yields to identify potential investment opportunities. Comparing these metrics \
                 against historical averages and sector peers helps investors avoid overpaying for growth.",
            ),
        ],
    },
];

impl SampleDocument {
    fn render(&self) -> String {
        let mut text = format!("{}\n", self.title);
        for (heading, body) in self.sections {
            text.push_str(&format!("\n{}\n{}\n", heading, body));
        }
        text
    }
}

/// Write the demo financial documents into `dir`, returning their paths.
pub fn write_sample_corpus(dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).context(format!("Failed to create data dir: {:?}", dir))?;

    let mut paths = Vec::with_capacity(DOCUMENTS.len());
    for document in DOCUMENTS {
        let path = dir.join(document.file_name);
        std::fs::write(&path, document.render())
            .context(format!("Failed to write sample document: {:?}", path))?;
        paths.push(path);
    }

    tracing::info!(documents = paths.len(), dir = %dir.display(), "wrote sample corpus");
    Ok(paths)
}
