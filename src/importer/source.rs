// ==========================================
// 分切/印刷机生产配置引擎 - 目录数据源
// ==========================================
// 职责: 从持久化协作方读取五类原始目录行
// 实现: 内存 (测试/宿主嵌入) / CSV 目录导出
// ==========================================

use crate::domain::catalog::{
    RawBobineFille, RawBobineMere, RawCatalogue, RawCliche, RawPerfo, RawRefente,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{CsvParser, LigneBrute};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

pub const FICHIER_BOBINES_MERES: &str = "bobines_meres.csv";
pub const FICHIER_BOBINES_FILLES: &str = "bobines_filles.csv";
pub const FICHIER_CLICHES: &str = "cliches.csv";
pub const FICHIER_PERFOS: &str = "perfos.csv";
pub const FICHIER_REFENTES: &str = "refentes.csv";

// ==========================================
// CatalogSource Trait
// ==========================================
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_bobines_meres(&self) -> ImportResult<Vec<RawBobineMere>>;

    async fn load_bobines_filles(&self) -> ImportResult<Vec<RawBobineFille>>;

    async fn load_cliches(&self) -> ImportResult<Vec<RawCliche>>;

    async fn load_perfos(&self) -> ImportResult<Vec<RawPerfo>>;

    async fn load_refentes(&self) -> ImportResult<Vec<RawRefente>>;

    /// 并发读取全部五类目录行
    async fn load_raw_catalogue(&self) -> ImportResult<RawCatalogue> {
        let (bobines_meres, bobines_filles, cliches, perfos, refentes) = futures::try_join!(
            self.load_bobines_meres(),
            self.load_bobines_filles(),
            self.load_cliches(),
            self.load_perfos(),
            self.load_refentes(),
        )?;

        Ok(RawCatalogue {
            bobines_meres,
            bobines_filles,
            cliches,
            perfos,
            refentes,
        })
    }
}

// ==========================================
// MemoryCatalogSource - 内存数据源
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogSource {
    raw: RawCatalogue,
}

impl MemoryCatalogSource {
    pub fn new(raw: RawCatalogue) -> Self {
        Self { raw }
    }
}

#[async_trait]
impl CatalogSource for MemoryCatalogSource {
    async fn load_bobines_meres(&self) -> ImportResult<Vec<RawBobineMere>> {
        Ok(self.raw.bobines_meres.clone())
    }

    async fn load_bobines_filles(&self) -> ImportResult<Vec<RawBobineFille>> {
        Ok(self.raw.bobines_filles.clone())
    }

    async fn load_cliches(&self) -> ImportResult<Vec<RawCliche>> {
        Ok(self.raw.cliches.clone())
    }

    async fn load_perfos(&self) -> ImportResult<Vec<RawPerfo>> {
        Ok(self.raw.perfos.clone())
    }

    async fn load_refentes(&self) -> ImportResult<Vec<RawRefente>> {
        Ok(self.raw.refentes.clone())
    }
}

// ==========================================
// CsvCatalogSource - CSV 目录导出
// ==========================================
pub struct CsvCatalogSource {
    dir: PathBuf,
    parser: CsvParser,
    mapper: FieldMapper,
}

impl CsvCatalogSource {
    /// # 参数
    /// - dir: 存放五个 CSV 文件的目录
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            parser: CsvParser,
            mapper: FieldMapper,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn read_lignes(&self, fichier: &str) -> ImportResult<Vec<LigneBrute>> {
        let path = self.dir.join(fichier);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ImportError::FileNotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let lignes = self.parser.parse_str(&content)?;
        debug!(fichier, lignes = lignes.len(), "CSV 读取完成");
        Ok(lignes)
    }

    async fn load_with<T: Send>(
        &self,
        fichier: &str,
        map: impl Fn(&FieldMapper, &LigneBrute) -> ImportResult<T> + Send,
    ) -> ImportResult<Vec<T>> {
        self.read_lignes(fichier)
            .await?
            .iter()
            .map(|ligne| map(&self.mapper, ligne))
            .collect()
    }
}

#[async_trait]
impl CatalogSource for CsvCatalogSource {
    async fn load_bobines_meres(&self) -> ImportResult<Vec<RawBobineMere>> {
        self.load_with(FICHIER_BOBINES_MERES, FieldMapper::map_bobine_mere)
            .await
    }

    async fn load_bobines_filles(&self) -> ImportResult<Vec<RawBobineFille>> {
        self.load_with(FICHIER_BOBINES_FILLES, FieldMapper::map_bobine_fille)
            .await
    }

    async fn load_cliches(&self) -> ImportResult<Vec<RawCliche>> {
        self.load_with(FICHIER_CLICHES, FieldMapper::map_cliche)
            .await
    }

    async fn load_perfos(&self) -> ImportResult<Vec<RawPerfo>> {
        self.load_with(FICHIER_PERFOS, FieldMapper::map_perfo).await
    }

    async fn load_refentes(&self) -> ImportResult<Vec<RawRefente>> {
        self.load_with(FICHIER_REFENTES, FieldMapper::map_refente)
            .await
    }
}
