use std::env;

use anyhow::Result;
use log::info;
use plan_common::{
    diff_stacks, CloudAssembly, DeployedStateGateway, DiffOptions, NoBackendGateway,
};
use plan_defs::RemoteFetchGateway;

use crate::DiffArgs;

pub async fn handle_diff(args: &DiffArgs) -> Result<i32> {
    let assembly = CloudAssembly::from_directory(&args.app)?;

    let gateway: Box<dyn RemoteFetchGateway> = match &args.deployed_state {
        Some(path) => Box::new(DeployedStateGateway::from_file(path)?),
        None => {
            info!("No deployed state given, every stack is treated as never deployed");
            Box::new(NoBackendGateway)
        }
    };

    let options = DiffOptions {
        quiet: args.quiet,
        fail: args.fail,
        change_set: args.change_set,
        exclusively: args.exclusively,
        color: !args.no_color && env::var_os("NO_COLOR").is_none(),
    };

    let mut stdout = std::io::stdout();
    let code = diff_stacks(
        &assembly,
        gateway.as_ref(),
        &args.stacks,
        &options,
        &mut stdout,
    )
    .await?;
    Ok(code)
}
