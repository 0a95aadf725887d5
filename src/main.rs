use clickchess::host::{Host, HostConfig};

fn main() {
    let mut host = Host::new(HostConfig::default());
    host.run();
}
