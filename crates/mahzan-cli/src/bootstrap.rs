/// Load `.env` (if present) plus the figment-layered configuration.
///
/// `.env` loading runs first so `MAHZAN_*` vars from a local `.env`
/// participate in the figment environment layer.
pub fn load_config() -> anyhow::Result<mahzan_config::MahzanConfig> {
    mahzan_config::MahzanConfig::load_with_dotenv().map_err(anyhow::Error::from)
}
