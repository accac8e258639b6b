//! Records build metadata (package version, commit) so the binary can
//! identify the exact build it came from at startup.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
