fn main() -> anyhow::Result<()> {
  weight_trajectory_lib::run()
}
