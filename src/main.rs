use anyhow::Result;
use ets_paper_export::utils::logging;
use ets_paper_export::{App, Config};

fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::load();

    // 运行解析流程
    App::new(config).run()
}
