use anyhow::Result;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::prelude::*;
use std::time::Duration;
use tracing::{error, info};

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_reference_tables::Migration),
            Box::new(m20240101_000003_create_stores_table::Migration),
            Box::new(m20240101_000004_create_sarees_table::Migration),
            Box::new(m20240101_000005_create_store_inventory_table::Migration),
            Box::new(m20240101_000006_create_cart_wishlist_tables::Migration),
            Box::new(m20240101_000007_create_orders_tables::Migration),
            Box::new(m20240101_000008_create_store_sales_tables::Migration),
            Box::new(m20240101_000009_create_stock_requests_table::Migration),
            Box::new(m20240101_000010_create_address_pincode_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_users_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Users::Name).string().not_null())
                        .col(ColumnDef::new(Users::Phone).string().null())
                        .col(ColumnDef::new(Users::Role).string().not_null())
                        .col(ColumnDef::new(Users::StoreId).uuid().null())
                        .col(
                            ColumnDef::new(Users::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_users_role")
                        .table(Users::Table)
                        .col(Users::Role)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
        Email,
        PasswordHash,
        Name,
        Phone,
        Role,
        StoreId,
        IsActive,
        CreatedAt,
    }
}

mod m20240101_000002_create_reference_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_reference_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Categories, colors and fabrics share the same shape
            manager
                .create_table(
                    Table::create()
                        .table(Categories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Categories::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Categories::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Categories::Description).text().null())
                        .col(ColumnDef::new(Categories::ImageUrl).string().null())
                        .col(
                            ColumnDef::new(Categories::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Colors::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Colors::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Colors::Name).string().not_null().unique_key())
                        .col(ColumnDef::new(Colors::HexCode).string().not_null())
                        .col(
                            ColumnDef::new(Colors::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Fabrics::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Fabrics::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Fabrics::Name).string().not_null().unique_key())
                        .col(ColumnDef::new(Fabrics::Description).text().null())
                        .col(
                            ColumnDef::new(Fabrics::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Fabrics::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Colors::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Categories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Categories {
        Table,
        Id,
        Name,
        Description,
        ImageUrl,
        IsActive,
    }

    #[derive(DeriveIden)]
    enum Colors {
        Table,
        Id,
        Name,
        HexCode,
        IsActive,
    }

    #[derive(DeriveIden)]
    enum Fabrics {
        Table,
        Id,
        Name,
        Description,
        IsActive,
    }
}

mod m20240101_000003_create_stores_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_stores_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Stores::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Stores::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Stores::Name).string().not_null())
                        .col(ColumnDef::new(Stores::Address).string().not_null())
                        .col(ColumnDef::new(Stores::Phone).string().null())
                        .col(ColumnDef::new(Stores::ManagerId).uuid().null())
                        .col(
                            ColumnDef::new(Stores::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Stores::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Stores::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Stores {
        Table,
        Id,
        Name,
        Address,
        Phone,
        ManagerId,
        IsActive,
        CreatedAt,
    }
}

mod m20240101_000004_create_sarees_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_sarees_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sarees::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Sarees::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Sarees::Name).string().not_null())
                        .col(ColumnDef::new(Sarees::Description).text().null())
                        .col(ColumnDef::new(Sarees::Price).decimal().not_null())
                        .col(ColumnDef::new(Sarees::CategoryId).uuid().null())
                        .col(ColumnDef::new(Sarees::ColorId).uuid().null())
                        .col(ColumnDef::new(Sarees::FabricId).uuid().null())
                        .col(ColumnDef::new(Sarees::ImageUrl).string().null())
                        .col(ColumnDef::new(Sarees::Sku).string().null().unique_key())
                        .col(
                            ColumnDef::new(Sarees::TotalStock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Sarees::OnlineStock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Sarees::DistributionChannel)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Sarees::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Sarees::IsFeatured)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Sarees::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sarees_category_id")
                        .table(Sarees::Table)
                        .col(Sarees::CategoryId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sarees_distribution_channel")
                        .table(Sarees::Table)
                        .col(Sarees::DistributionChannel)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sarees::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Sarees {
        Table,
        Id,
        Name,
        Description,
        Price,
        CategoryId,
        ColorId,
        FabricId,
        ImageUrl,
        Sku,
        TotalStock,
        OnlineStock,
        DistributionChannel,
        IsActive,
        IsFeatured,
        CreatedAt,
    }
}

mod m20240101_000005_create_store_inventory_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_store_inventory_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StoreInventory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StoreInventory::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StoreInventory::StoreId).uuid().not_null())
                        .col(ColumnDef::new(StoreInventory::SareeId).uuid().not_null())
                        .col(
                            ColumnDef::new(StoreInventory::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(StoreInventory::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // One ledger row per store and product
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_store_inventory_store_saree")
                        .table(StoreInventory::Table)
                        .col(StoreInventory::StoreId)
                        .col(StoreInventory::SareeId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StoreInventory::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum StoreInventory {
        Table,
        Id,
        StoreId,
        SareeId,
        Quantity,
        UpdatedAt,
    }
}

mod m20240101_000006_create_cart_wishlist_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_cart_wishlist_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CartItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CartItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CartItems::UserId).uuid().not_null())
                        .col(ColumnDef::new(CartItems::SareeId).uuid().not_null())
                        .col(
                            ColumnDef::new(CartItems::Quantity)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(ColumnDef::new(CartItems::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_cart_items_user_saree")
                        .table(CartItems::Table)
                        .col(CartItems::UserId)
                        .col(CartItems::SareeId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(WishlistItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WishlistItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(WishlistItems::UserId).uuid().not_null())
                        .col(ColumnDef::new(WishlistItems::SareeId).uuid().not_null())
                        .col(
                            ColumnDef::new(WishlistItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_wishlist_items_user_saree")
                        .table(WishlistItems::Table)
                        .col(WishlistItems::UserId)
                        .col(WishlistItems::SareeId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WishlistItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(CartItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum CartItems {
        Table,
        Id,
        UserId,
        SareeId,
        Quantity,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum WishlistItems {
        Table,
        Id,
        UserId,
        SareeId,
        CreatedAt,
    }
}

mod m20240101_000007_create_orders_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_orders_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Orders::UserId).uuid().not_null())
                        .col(
                            ColumnDef::new(Orders::TotalAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Orders::Status).string().not_null())
                        .col(ColumnDef::new(Orders::ShippingAddress).string().not_null())
                        .col(ColumnDef::new(Orders::Phone).string().not_null())
                        .col(ColumnDef::new(Orders::Notes).string().null())
                        .col(ColumnDef::new(Orders::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Orders::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_user_id")
                        .table(Orders::Table)
                        .col(Orders::UserId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_status")
                        .table(Orders::Table)
                        .col(Orders::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderItems::OrderId).uuid().not_null())
                        .col(ColumnDef::new(OrderItems::SareeId).uuid().not_null())
                        .col(ColumnDef::new(OrderItems::Quantity).integer().not_null())
                        .col(ColumnDef::new(OrderItems::Price).decimal().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_order_items_order_id")
                        .table(OrderItems::Table)
                        .col(OrderItems::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Orders {
        Table,
        Id,
        UserId,
        TotalAmount,
        Status,
        ShippingAddress,
        Phone,
        Notes,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum OrderItems {
        Table,
        Id,
        OrderId,
        SareeId,
        Quantity,
        Price,
    }
}

mod m20240101_000008_create_store_sales_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_store_sales_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StoreSales::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StoreSales::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StoreSales::StoreId).uuid().not_null())
                        .col(ColumnDef::new(StoreSales::SoldBy).uuid().not_null())
                        .col(ColumnDef::new(StoreSales::CustomerName).string().null())
                        .col(ColumnDef::new(StoreSales::CustomerPhone).string().null())
                        .col(
                            ColumnDef::new(StoreSales::TotalAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(StoreSales::SaleType).string().not_null())
                        .col(ColumnDef::new(StoreSales::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_store_sales_store_id")
                        .table(StoreSales::Table)
                        .col(StoreSales::StoreId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StoreSaleItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StoreSaleItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StoreSaleItems::SaleId).uuid().not_null())
                        .col(ColumnDef::new(StoreSaleItems::SareeId).uuid().not_null())
                        .col(
                            ColumnDef::new(StoreSaleItems::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StoreSaleItems::Price).decimal().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_store_sale_items_sale_id")
                        .table(StoreSaleItems::Table)
                        .col(StoreSaleItems::SaleId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StoreSaleItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(StoreSales::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum StoreSales {
        Table,
        Id,
        StoreId,
        SoldBy,
        CustomerName,
        CustomerPhone,
        TotalAmount,
        SaleType,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum StoreSaleItems {
        Table,
        Id,
        SaleId,
        SareeId,
        Quantity,
        Price,
    }
}

mod m20240101_000009_create_stock_requests_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000009_create_stock_requests_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StockRequests::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockRequests::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockRequests::StoreId).uuid().not_null())
                        .col(ColumnDef::new(StockRequests::RequestedBy).uuid().not_null())
                        .col(ColumnDef::new(StockRequests::SareeId).uuid().not_null())
                        .col(ColumnDef::new(StockRequests::Quantity).integer().not_null())
                        .col(ColumnDef::new(StockRequests::Status).string().not_null())
                        .col(ColumnDef::new(StockRequests::ApprovedBy).uuid().null())
                        .col(ColumnDef::new(StockRequests::Notes).string().null())
                        .col(
                            ColumnDef::new(StockRequests::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockRequests::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_requests_store_id")
                        .table(StockRequests::Table)
                        .col(StockRequests::StoreId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_requests_status")
                        .table(StockRequests::Table)
                        .col(StockRequests::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockRequests::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum StockRequests {
        Table,
        Id,
        StoreId,
        RequestedBy,
        SareeId,
        Quantity,
        Status,
        ApprovedBy,
        Notes,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000010_create_address_pincode_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000010_create_address_pincode_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(UserAddresses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserAddresses::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UserAddresses::UserId).uuid().not_null())
                        .col(ColumnDef::new(UserAddresses::Name).string().not_null())
                        .col(ColumnDef::new(UserAddresses::Phone).string().not_null())
                        .col(ColumnDef::new(UserAddresses::Locality).string().not_null())
                        .col(ColumnDef::new(UserAddresses::City).string().not_null())
                        .col(ColumnDef::new(UserAddresses::Pincode).string().not_null())
                        .col(
                            ColumnDef::new(UserAddresses::IsDefault)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(UserAddresses::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_user_addresses_user_id")
                        .table(UserAddresses::Table)
                        .col(UserAddresses::UserId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ServiceablePincodes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ServiceablePincodes::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ServiceablePincodes::Pincode)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(ServiceablePincodes::City).string().not_null())
                        .col(
                            ColumnDef::new(ServiceablePincodes::State)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ServiceablePincodes::DeliveryDays)
                                .integer()
                                .not_null()
                                .default(5),
                        )
                        .col(
                            ColumnDef::new(ServiceablePincodes::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(ServiceablePincodes::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ServiceablePincodes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(UserAddresses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum UserAddresses {
        Table,
        Id,
        UserId,
        Name,
        Phone,
        Locality,
        City,
        Pincode,
        IsDefault,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum ServiceablePincodes {
        Table,
        Id,
        Pincode,
        City,
        State,
        DeliveryDays,
        IsActive,
        CreatedAt,
    }
}

// Database migration CLI runner
pub async fn run_migration(db_url: &str) -> Result<()> {
    info!("Setting up database connection for migrations");

    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;

    info!("Running database migrations");

    match Migrator::up(&db, None).await {
        Ok(_) => {
            info!("Migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Migration failed: {}", e);
            Err(e.into())
        }
    }
}
